use std::cell::{Cell, RefCell};
use std::ops::Deref;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::event::Handle;
use crate::geometry::{Rect, Vector};
use crate::input::{Cursor, KeyCode, Modifiers, MouseButton};
use crate::lifecycle::{Callbacks, Lifecycle};
use crate::platform::Surface;
use crate::registry::Registry;

/// How a window is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayState {
    #[default]
    Restored,
    Minimized,
    Maximized,
    /// Borderless and maximized. Derived from style + show state rather than
    /// stored as a style bit.
    FullScreen,
}

/// Window frame style, fixed at creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Caption, system menu, resizable frame, min/max boxes.
    #[default]
    Normal,
    /// No frame at all.
    Popup,
}

impl Style {
    /// `WS_VISIBLE` alone: the borderless style used for full-screen.
    pub const FULLSCREEN_BITS: u32 = 0x1000_0000;

    /// `WS_POPUP | WS_CAPTION | WS_SYSMENU | WS_THICKFRAME`. A window with
    /// none of these is frameless; the platform may still add state bits
    /// such as `WS_MAXIMIZE` on top.
    pub const FRAME_MASK: u32 = 0x80CC_0000;

    /// Whether raw style bits describe the full-screen style.
    pub const fn is_full_screen(bits: u32) -> bool {
        bits & Self::FRAME_MASK == 0
    }

    /// Raw Win32 style bits.
    pub const fn bits(self) -> u32 {
        match self {
            // WS_OVERLAPPEDWINDOW | WS_VISIBLE
            Self::Normal => 0x10CF_0000,
            // WS_POPUP | WS_VISIBLE
            Self::Popup => 0x9000_0000,
        }
    }
}

/// A window as seen by its owner and its callbacks.
///
/// Every callback receives the `LogicalWindow` it belongs to as its first
/// argument. Accessors forward to the native window and quietly do nothing
/// once the window is uninitialized or destroyed.
pub struct LogicalWindow {
    handle: Handle,
    title: RefCell<String>,
    style: Style,
    lifecycle: Cell<Lifecycle>,
    surface: Option<Box<dyn Surface>>,
    pub(crate) callbacks: RefCell<Callbacks>,
    registry: Registry,
}

impl LogicalWindow {
    pub(crate) fn new(
        title: String,
        style: Style,
        surface: Option<Box<dyn Surface>>,
        registry: Registry,
    ) -> Self {
        let (handle, lifecycle) = match &surface {
            Some(s) => (s.handle(), Lifecycle::Live),
            None => (Handle::NULL, Lifecycle::Uninitialized),
        };
        Self {
            handle,
            title: RefCell::new(title),
            style,
            lifecycle: Cell::new(lifecycle),
            surface,
            callbacks: RefCell::new(Callbacks::default()),
            registry,
        }
    }

    /// A window with no native surface, for exercising the state machine.
    #[cfg(test)]
    pub(crate) fn detached(handle: Handle, lifecycle: Lifecycle) -> Self {
        let window = Self::new(String::new(), Style::Normal, None, Registry::new());
        Self {
            handle,
            lifecycle: Cell::new(lifecycle),
            ..window
        }
    }

    /// The native handle; null if construction failed.
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Whether construction succeeded and the window has not been destroyed.
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null() && self.lifecycle().has_native_window()
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle() == Lifecycle::Destroyed
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.get()
    }

    pub(crate) fn set_lifecycle(&self, lifecycle: Lifecycle) {
        self.lifecycle.set(lifecycle);
    }

    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// The surface while the native window exists.
    fn surface(&self) -> Option<&dyn Surface> {
        if !self.lifecycle().has_native_window() {
            return None;
        }
        self.surface.as_deref()
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    pub fn set_title(&self, title: &str) {
        let Some(surface) = self.surface() else {
            return;
        };
        match surface.set_title(title) {
            Ok(()) => *self.title.borrow_mut() = title.to_string(),
            Err(e) => crate::log_warn!("set_title {}: {e}", self.handle),
        }
    }

    /// Client-area size.
    pub fn size(&self) -> Vector {
        self.surface()
            .and_then(|s| s.client_rect().ok())
            .map(|r| r.size())
            .unwrap_or_default()
    }

    /// Resizes the outer frame.
    pub fn set_size(&self, size: Vector) {
        if let Some(surface) = self.surface()
            && let Err(e) = surface.set_size(size)
        {
            crate::log_warn!("set_size {}: {e}", self.handle);
        }
    }

    /// Screen position of the visible frame.
    pub fn position(&self) -> Vector {
        self.surface()
            .and_then(|s| s.window_rect().ok())
            .map(|r| r.origin())
            .unwrap_or_default()
    }

    pub fn set_position(&self, position: Vector) {
        if let Some(surface) = self.surface()
            && let Err(e) = surface.set_position(position)
        {
            crate::log_warn!("set_position {}: {e}", self.handle);
        }
    }

    /// Current display state.
    ///
    /// `FullScreen` is reported only while the window is both maximized and
    /// stripped down to the borderless style.
    pub fn state(&self) -> DisplayState {
        let Some(surface) = self.surface() else {
            return DisplayState::Restored;
        };
        let shown = surface.show_state();
        if shown == DisplayState::Maximized && Style::is_full_screen(surface.style_bits()) {
            return DisplayState::FullScreen;
        }
        shown
    }

    /// Changes the display state.
    ///
    /// `FullScreen` swaps in the borderless style and maximizes; any other
    /// state first restores the style the window was created with.
    pub fn set_state(&self, state: DisplayState) {
        let Some(surface) = self.surface() else {
            return;
        };
        match state {
            DisplayState::FullScreen => {
                surface.set_style_bits(Style::FULLSCREEN_BITS);
                surface.show(DisplayState::Maximized);
            }
            other => {
                if Style::is_full_screen(surface.style_bits()) {
                    surface.set_style_bits(self.style.bits());
                }
                surface.show(other);
            }
        }
    }

    pub fn set_cursor(&self, cursor: impl Into<Cursor>) {
        let cursor = cursor.into();
        if let Some(surface) = self.surface()
            && let Err(e) = surface.set_cursor(&cursor)
        {
            crate::log_warn!("set_cursor {cursor:?}: {e}");
        }
    }

    /// Cursor position relative to the client area, or `None` when the
    /// cursor is outside it.
    pub fn mouse_position(&self) -> Option<Vector> {
        let surface = self.surface()?;
        let client = surface.client_rect().ok()?;
        let cursor = surface.cursor_position().ok()?;
        if !client.contains(cursor) {
            return None;
        }
        Some(Vector::new(cursor.x - client.x, cursor.y - client.y))
    }

    /// Moves the cursor to a client-relative point. Only acts while this
    /// window is active.
    pub fn set_mouse_position(&self, position: Vector) {
        let Some(surface) = self.surface() else {
            return;
        };
        if !surface.is_active() {
            return;
        }
        let Ok(client) = surface.client_rect() else {
            return;
        };
        let target = Vector::new(
            client.x.saturating_add(position.x),
            client.y.saturating_add(position.y),
        );
        if let Err(e) = surface.set_cursor_position(target) {
            crate::log_warn!("set_mouse_position {}: {e}", self.handle);
        }
    }

    /// Confines the cursor to a client-relative rectangle, truncated to the
    /// client area.
    pub fn lock_mouse(&self, position: Vector, size: Vector) {
        let Some(surface) = self.surface() else {
            return;
        };
        let Ok(client) = surface.client_rect() else {
            return;
        };
        let requested = Rect::new(
            client.x.saturating_add(position.x),
            client.y.saturating_add(position.y),
            size.x,
            size.y,
        );
        if let Err(e) = surface.clip_cursor(Some(client.intersect(&requested))) {
            crate::log_warn!("lock_mouse {}: {e}", self.handle);
        }
    }

    pub fn unlock_mouse(&self) {
        if let Some(surface) = self.surface()
            && let Err(e) = surface.clip_cursor(None)
        {
            crate::log_warn!("unlock_mouse {}: {e}", self.handle);
        }
    }

    /// Whether a key is held. Always `false` while another window is active.
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.surface()
            .is_some_and(|s| s.is_active() && s.is_key_down(key))
    }

    /// Forces an immediate repaint of any invalid region.
    pub fn update(&self) {
        if let Some(surface) = self.surface() {
            surface.update();
        }
    }

    /// Asks the window to close, exactly as if the user clicked the close
    /// button: the close callback runs, then the window is destroyed.
    pub fn close(&self) {
        if self.lifecycle() != Lifecycle::Live {
            return;
        }
        if let Some(surface) = self.surface() {
            surface.request_close();
        }
    }

    /// Destroys the native window without a close request.
    ///
    /// The destroy callback still runs when the platform confirms teardown.
    pub fn destroy(&self) {
        if self.begin_destroy() {
            self.destroy_native();
        }
    }

    fn destroy_native(&self) {
        if let Some(surface) = self.surface.as_deref() {
            surface.destroy();
        }
    }

    pub(crate) fn set_parent(&self, parent: Handle) {
        if let Some(surface) = self.surface()
            && let Err(e) = surface.set_parent(parent)
        {
            crate::log_warn!("set_parent {} -> {parent}: {e}", self.handle);
        }
    }

    /// Runs on every repaint request.
    pub fn on_update(&self, f: impl FnMut(&LogicalWindow) + 'static) {
        self.callbacks.borrow_mut().update = Some(Box::new(f));
    }

    /// Receives the cursor position in client coordinates.
    pub fn on_mouse_move(&self, f: impl FnMut(&LogicalWindow, Vector) + 'static) {
        self.callbacks.borrow_mut().mouse_move = Some(Box::new(f));
    }

    pub fn on_mouse_click(
        &self,
        f: impl FnMut(&LogicalWindow, MouseButton, Vector, Modifiers) + 'static,
    ) {
        self.callbacks.borrow_mut().mouse_click = Some(Box::new(f));
    }

    /// Receives `true` for a forward (away from the user) wheel turn.
    pub fn on_mouse_scroll(&self, f: impl FnMut(&LogicalWindow, bool) + 'static) {
        self.callbacks.borrow_mut().mouse_scroll = Some(Box::new(f));
    }

    /// Called for each translated character.
    ///
    /// Only backspace, tab, enter, escape and printable ASCII reach this
    /// callback; other control codes and non-ASCII characters are dropped.
    pub fn on_key(&self, f: impl FnMut(&LogicalWindow, KeyCode) + 'static) {
        self.callbacks.borrow_mut().key = Some(Box::new(f));
    }

    pub fn on_move(&self, f: impl FnMut(&LogicalWindow, Vector) + 'static) {
        self.callbacks.borrow_mut().moved = Some(Box::new(f));
    }

    pub fn on_resize(&self, f: impl FnMut(&LogicalWindow, Vector, DisplayState) + 'static) {
        self.callbacks.borrow_mut().resize = Some(Box::new(f));
    }

    /// Runs before the native window is torn down. Closing cannot be
    /// cancelled.
    pub fn on_close(&self, f: impl FnMut(&LogicalWindow) + 'static) {
        self.callbacks.borrow_mut().close = Some(Box::new(f));
    }

    pub fn on_destroy(&self, f: impl FnMut(&LogicalWindow) + 'static) {
        self.callbacks.borrow_mut().destroy = Some(Box::new(f));
    }

    /// Drops every callback.
    pub fn clear_callbacks(&self) {
        *self.callbacks.borrow_mut() = Callbacks::default();
    }
}

/// An owned window.
///
/// Dereferences to [`LogicalWindow`]. Dropping it destroys the native
/// window if it still exists and removes it from the registry; the registry
/// itself never keeps a window alive.
pub struct Window {
    inner: Rc<LogicalWindow>,
}

impl Window {
    pub(crate) fn from_shared(inner: Rc<LogicalWindow>) -> Self {
        Self { inner }
    }

    /// A window whose construction failed.
    pub(crate) fn uninitialized(title: String, style: Style, registry: Registry) -> Self {
        Self::from_shared(Rc::new(LogicalWindow::new(title, style, None, registry)))
    }
}

impl Deref for Window {
    type Target = LogicalWindow;

    fn deref(&self) -> &LogicalWindow {
        &self.inner
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        let window = &*self.inner;
        match window.lifecycle() {
            Lifecycle::Uninitialized => return,
            Lifecycle::Live => window.destroy(),
            // Dropped halfway through a close.
            Lifecycle::Destroying => window.destroy_native(),
            Lifecycle::Destroyed => {}
        }
        // Synchronous platforms deliver the destroy notification from
        // inside the calls above and finish the transition there.
        window.complete_destroy();
        window.registry().unregister(window.handle());
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("handle", &self.handle())
            .field("title", &self.title())
            .field("lifecycle", &self.lifecycle())
            .finish()
    }
}
