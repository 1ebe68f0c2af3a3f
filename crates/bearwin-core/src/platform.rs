//! Collaborator traits implemented by platform crates.
//!
//! Everything here is request/response forwarding to the OS. The core
//! never calls the OS directly; `bearwin-windows` implements these traits
//! on top of Win32.

use std::path::PathBuf;

use crate::event::Handle;
use crate::geometry::{Rect, Vector};
use crate::input::{Cursor, KeyCode};
use crate::window::{DisplayState, Style};

/// A boxed error type for platform operations.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Class-level resources for a new window.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    /// Window class name. Several windows may share one.
    pub name: String,
    /// Cursor shown over the client area.
    pub cursor: Cursor,
    /// Large icon file (taskbar / alt-tab). `None` uses the stock icon.
    pub icon: Option<PathBuf>,
    /// Small icon file (title bar). `None` uses the stock icon.
    pub small_icon: Option<PathBuf>,
}

/// Per-window creation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateParams {
    pub title: String,
    pub size: Vector,
    pub position: Vector,
    pub style: Style,
    pub parent: Option<Handle>,
}

/// Creates native windows.
///
/// Implementations register the class (routing every message of the class
/// through their window procedure) and create the native handle.
pub trait Platform {
    /// Registers the class if needed and creates a window of it.
    fn create_surface(
        &self,
        class: &ClassDescriptor,
        params: &CreateParams,
    ) -> WindowResult<Box<dyn Surface>>;

    /// Resolution of the primary monitor in pixels.
    fn monitor_resolution(&self) -> Vector;
}

/// A created native window.
///
/// Methods forward straight to the OS; none of them touch the registry or
/// fire callbacks.
pub trait Surface {
    /// The native handle. Never null.
    fn handle(&self) -> Handle;

    fn set_title(&self, title: &str) -> WindowResult<()>;

    /// Client area in screen coordinates.
    fn client_rect(&self) -> WindowResult<Rect>;

    /// Visible window frame in screen coordinates.
    fn window_rect(&self) -> WindowResult<Rect>;

    /// Resizes the window frame, keeping its position.
    fn set_size(&self, size: Vector) -> WindowResult<()>;

    /// Moves the visible frame origin, keeping its size.
    fn set_position(&self, position: Vector) -> WindowResult<()>;

    /// Current show state. Never reports `FullScreen`.
    fn show_state(&self) -> DisplayState;

    /// Shows the window in the given state. `FullScreen` is not passed here;
    /// the caller realizes it as borderless + `Maximized`.
    fn show(&self, state: DisplayState);

    /// Raw style bits currently applied to the window.
    fn style_bits(&self) -> u32;

    /// Replaces the style bits and refreshes the frame.
    fn set_style_bits(&self, bits: u32);

    fn set_parent(&self, parent: Handle) -> WindowResult<()>;

    /// Forces an immediate paint of any invalid region.
    fn update(&self);

    /// Posts a close request to the window's own queue.
    fn request_close(&self);

    /// Destroys the native window. The platform delivers the destroy
    /// notification through the window procedure.
    fn destroy(&self);

    /// Whether this window is the active window of the calling thread.
    fn is_active(&self) -> bool;

    fn set_cursor(&self, cursor: &Cursor) -> WindowResult<()>;

    /// Cursor position in screen coordinates.
    fn cursor_position(&self) -> WindowResult<Vector>;

    fn set_cursor_position(&self, position: Vector) -> WindowResult<()>;

    /// Confines the cursor to `area` (screen coordinates), or releases it.
    fn clip_cursor(&self, area: Option<Rect>) -> WindowResult<()>;

    fn is_key_down(&self, key: KeyCode) -> bool;
}
