#[cfg(not(windows))]
pub fn execute() {
    crate::commands::windows_only("debug events")
}

/// Opens a single window and prints every event it receives. Close the
/// window to stop.
#[cfg(windows)]
pub fn execute() {
    use bearwin_core::WindowBuilder;
    use bearwin_windows::EventLoop;

    let config = crate::commands::load_config();
    let event_loop = EventLoop::new();

    let builder = WindowBuilder::from_config(&config.window).title("bearwin debug events");
    let window = match event_loop.try_create_window(builder) {
        Ok(window) => window,
        Err(e) => {
            eprintln!("Failed to create window: {e}");
            std::process::exit(1);
        }
    };
    crate::commands::demo::attach(&window, true);

    println!("Watching window events (close the window to stop)...\n");
    event_loop.run();
}
