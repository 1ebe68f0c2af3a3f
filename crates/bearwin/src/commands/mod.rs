pub mod debug;
pub mod demo;
pub mod init;

/// Reports that a command needs a Win32 desktop and exits.
#[cfg(not(windows))]
pub fn windows_only(command: &str) -> ! {
    eprintln!("Error: `bearwin {command}` needs a Windows desktop session.");
    std::process::exit(1);
}

/// Loads the user configuration and starts file logging if enabled.
#[cfg(windows)]
pub fn load_config() -> bearwin_core::Config {
    let config = bearwin_core::config::load();
    bearwin_core::log::init(&config.logging);
    config
}
