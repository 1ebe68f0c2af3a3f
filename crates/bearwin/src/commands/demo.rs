#[derive(clap::Args)]
pub struct DemoArgs {
    /// Number of windows to open
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..=16))]
    pub count: u16,
}

#[cfg(not(windows))]
pub fn execute(_args: &DemoArgs) {
    super::windows_only("demo")
}

/// Opens `count` windows sharing one class and logs their events.
///
/// The process exits once every window has been closed.
#[cfg(windows)]
pub fn execute(args: &DemoArgs) {
    use bearwin_core::{Platform, Vector, WindowBuilder};
    use bearwin_windows::EventLoop;

    let config = super::load_config();
    let event_loop = EventLoop::new();
    let screen = event_loop.monitor_resolution();
    println!("Primary monitor: {}x{}", screen.x, screen.y);

    let mut windows = Vec::new();
    for i in 0..i32::from(args.count) {
        let builder = WindowBuilder::from_config(&config.window)
            .title(format!("{} #{}", config.window.title, i + 1))
            .class_name(config.window.title.clone())
            .position(Vector::new(config.window.x + 40 * i, config.window.y + 40 * i));

        match event_loop.try_create_window(builder) {
            Ok(window) => {
                attach(&window, false);
                windows.push(window);
            }
            Err(e) => eprintln!("Error: could not create window {}: {e}", i + 1),
        }
    }

    if windows.is_empty() {
        std::process::exit(1);
    }

    println!("Keys: f = full screen, m = maximize, n = minimize, r = restore,");
    println!("      l = lock mouse, u = unlock mouse, Esc = close.\n");

    let messages = event_loop.run();
    println!("All windows closed after {messages} messages.");
}

/// Prints every event a window receives and wires up the demo keys.
///
/// Mouse movement and paint are only printed when `verbose` is set.
#[cfg(windows)]
pub fn attach(window: &bearwin_core::LogicalWindow, verbose: bool) {
    use bearwin_core::{DisplayState, KeyCode, Vector};

    if verbose {
        window.on_update(|w| println!("[{}] paint", w.title()));
        window.on_mouse_move(|w, p| println!("[{}] mouse-move ({}, {})", w.title(), p.x, p.y));
    }
    window.on_mouse_click(|w, button, p, mods| {
        println!(
            "[{}] mouse-click {button:?} ({}, {}) ctrl={} shift={}",
            w.title(),
            p.x,
            p.y,
            mods.control,
            mods.shift
        );
    });
    window.on_mouse_scroll(|w, forward| {
        let dir = if forward { "forward" } else { "backward" };
        println!("[{}] mouse-scroll {dir}", w.title());
    });
    window.on_move(|w, p| println!("[{}] move ({}, {})", w.title(), p.x, p.y));
    window.on_resize(|w, size, state| {
        println!("[{}] resize {}x{} {state:?}", w.title(), size.x, size.y);
    });
    window.on_close(|w| println!("[{}] close", w.title()));
    window.on_destroy(|w| println!("[{}] destroy", w.title()));

    window.on_key(|w, key| {
        println!("[{}] key {key}", w.title());
        match key.as_char() {
            'f' => w.set_state(DisplayState::FullScreen),
            'm' => w.set_state(DisplayState::Maximized),
            'n' => w.set_state(DisplayState::Minimized),
            'r' => w.set_state(DisplayState::Restored),
            'l' => w.lock_mouse(Vector::new(0, 0), w.size()),
            'u' => w.unlock_mouse(),
            _ if key == KeyCode::ESCAPE => w.close(),
            _ => {}
        }
    });
}
