/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `bearwin init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Bear Window configuration
# Location: ~/.config/bearwin/config.toml

[window]
# Title of new windows. Also used as the window class name.
title = "Bear Window"
# Outer size in pixels (1 to 16384).
width = 800
height = 600
# Screen position of the top-left corner.
x = 100
y = 100
# Initial display state: "restored", "minimized", "maximized" or "full-screen".
state = "restored"
# Frame style: "normal" (caption, resizable border) or "popup" (no frame).
style = "normal"
# Stock cursor: arrow, i-beam, wait, crosshair, up-arrow, size-nwse,
# size-nesw, size-we, size-ns, move, blocked, hand, help.
cursor = "arrow"
# Load the cursor from a .cur/.ani file instead:
# cursor_file = "C:/path/to/pointer.cur"
# Icons (.ico) for the taskbar and the title bar:
# icon = "C:/path/to/app.ico"
# small_icon = "C:/path/to/app-small.ico"

[logging]
# Enable file logging to ~/.config/bearwin/logs/bearwin.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
