mod loader;
pub mod template;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::input::PointerShape;
use crate::log::LogConfig;
use crate::window::{DisplayState, Style};

pub use loader::{config_dir, config_path, load, try_load};

/// Top-level configuration for Bear Window.
///
/// Loaded from `~/.config/bearwin/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for newly built windows.
    pub window: WindowConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Defaults applied by `WindowBuilder::from_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title, and class name unless one is given explicitly.
    pub title: String,
    /// Outer width in pixels.
    pub width: i32,
    /// Outer height in pixels.
    pub height: i32,
    /// Screen x of the top-left corner.
    pub x: i32,
    /// Screen y of the top-left corner.
    pub y: i32,
    /// Initial display state: "restored", "minimized", "maximized" or "full-screen".
    pub state: DisplayState,
    /// Frame style: "normal" or "popup".
    pub style: Style,
    /// Stock cursor shape, e.g. "arrow", "hand", "i-beam".
    pub cursor: PointerShape,
    /// Cursor file (`.cur` / `.ani`); overrides `cursor` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_file: Option<PathBuf>,
    /// Taskbar icon file (`.ico`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,
    /// Title-bar icon file (`.ico`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_icon: Option<PathBuf>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Bear Window".into(),
            width: 800,
            height: 600,
            x: 100,
            y: 100,
            state: DisplayState::Restored,
            style: Style::Normal,
            cursor: PointerShape::Arrow,
            cursor_file: None,
            icon: None,
            small_icon: None,
        }
    }
}

/// Largest accepted window dimension or coordinate magnitude.
const MAX_EXTENT: i32 = 16384;

impl Config {
    /// Clamps window geometry to sane ranges.
    ///
    /// Prevents zero or negative sizes and positions far outside any
    /// monitor. An empty title falls back to the default.
    pub fn validate(&mut self) {
        let w = &mut self.window;
        w.width = w.width.clamp(1, MAX_EXTENT);
        w.height = w.height.clamp(1, MAX_EXTENT);
        w.x = w.x.clamp(-MAX_EXTENT, MAX_EXTENT);
        w.y = w.y.clamp(-MAX_EXTENT, MAX_EXTENT);
        if w.title.trim().is_empty() {
            w.title = WindowConfig::default().title;
        }
    }
}
