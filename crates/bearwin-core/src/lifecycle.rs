//! Per-window state machine and event application.
//!
//! ```text
//! Uninitialized ──create──▶ Live ──close──▶ Destroying ──destroy──▶ Destroyed
//!                             └────────────destroy──────────────────────▲
//! ```

use crate::dispatch::Disposition;
use crate::event::WindowEvent;
use crate::geometry::Vector;
use crate::input::{KeyCode, Modifiers, MouseButton};
use crate::window::{DisplayState, LogicalWindow};

/// Lifecycle state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Construction failed; there is no native handle.
    Uninitialized,
    /// Registered and receiving events.
    Live,
    /// A close was accepted or a destroy was requested; the native window
    /// is being torn down.
    Destroying,
    /// The platform confirmed teardown. Terminal.
    Destroyed,
}

impl Lifecycle {
    /// Whether the native window still exists.
    pub fn has_native_window(self) -> bool {
        matches!(self, Self::Live | Self::Destroying)
    }
}

pub type UpdateCallback = Box<dyn FnMut(&LogicalWindow)>;
pub type MouseMoveCallback = Box<dyn FnMut(&LogicalWindow, Vector)>;
pub type MouseClickCallback = Box<dyn FnMut(&LogicalWindow, MouseButton, Vector, Modifiers)>;
pub type MouseScrollCallback = Box<dyn FnMut(&LogicalWindow, bool)>;
pub type KeyCallback = Box<dyn FnMut(&LogicalWindow, KeyCode)>;
pub type MoveCallback = Box<dyn FnMut(&LogicalWindow, Vector)>;
pub type ResizeCallback = Box<dyn FnMut(&LogicalWindow, Vector, DisplayState)>;
pub type CloseCallback = Box<dyn FnMut(&LogicalWindow)>;
pub type DestroyCallback = Box<dyn FnMut(&LogicalWindow)>;

/// The nine optional callback slots of a window. An empty slot ignores
/// its event class.
#[derive(Default)]
pub struct Callbacks {
    pub(crate) update: Option<UpdateCallback>,
    pub(crate) mouse_move: Option<MouseMoveCallback>,
    pub(crate) mouse_click: Option<MouseClickCallback>,
    pub(crate) mouse_scroll: Option<MouseScrollCallback>,
    pub(crate) key: Option<KeyCallback>,
    pub(crate) moved: Option<MoveCallback>,
    pub(crate) resize: Option<ResizeCallback>,
    pub(crate) close: Option<CloseCallback>,
    pub(crate) destroy: Option<DestroyCallback>,
}

/// Invokes a callback slot if it is set.
///
/// The callback is taken out of its slot for the duration of the call, so
/// it may re-enter the window (including replacing itself) without a
/// borrow conflict. It is put back only if the slot is still empty.
macro_rules! fire {
    ($window:expr, $slot:ident $(, $arg:expr)*) => {{
        let window: &LogicalWindow = $window;
        let taken = window.callbacks.borrow_mut().$slot.take();
        if let Some(mut callback) = taken {
            callback(window $(, $arg)*);
            let mut callbacks = window.callbacks.borrow_mut();
            if callbacks.$slot.is_none() {
                callbacks.$slot = Some(callback);
            }
        }
    }};
}

impl LogicalWindow {
    /// Applies a translated event, invoking at most one callback.
    pub(crate) fn apply(&self, event: WindowEvent) -> Disposition {
        match event {
            WindowEvent::Paint => {
                fire!(self, update);
                // The platform still has to validate the dirty region.
                Disposition::Default
            }
            WindowEvent::MouseMove { position } => {
                fire!(self, mouse_move, position);
                Disposition::Handled
            }
            WindowEvent::MouseClick {
                button,
                position,
                modifiers,
            } => {
                fire!(self, mouse_click, button, position, modifiers);
                Disposition::Handled
            }
            WindowEvent::MouseScroll { forward } => {
                fire!(self, mouse_scroll, forward);
                Disposition::Handled
            }
            WindowEvent::Key { key } => {
                fire!(self, key, key);
                Disposition::Handled
            }
            WindowEvent::Move { position } => {
                fire!(self, moved, position);
                Disposition::Handled
            }
            WindowEvent::Resize { size, state } => {
                fire!(self, resize, size, state);
                Disposition::Handled
            }
            WindowEvent::Close => self.begin_close(),
            WindowEvent::Destroy => {
                self.complete_destroy();
                Disposition::Handled
            }
        }
    }

    /// `Live → Destroying` on a close request.
    ///
    /// The close callback runs while the native window still exists. The
    /// request cannot be vetoed; the caller is told to tear the handle down.
    fn begin_close(&self) -> Disposition {
        if self.lifecycle() != Lifecycle::Live {
            return Disposition::Handled;
        }
        self.set_lifecycle(Lifecycle::Destroying);
        crate::log_debug!("window {} closing", self.handle());

        fire!(self, close);

        // The callback may already have destroyed the window itself.
        if self.lifecycle() == Lifecycle::Destroyed {
            return Disposition::Handled;
        }
        Disposition::Destroy(self.handle())
    }

    /// `Live → Destroying` on an explicit request from the owner.
    ///
    /// Skips the close callback. Returns whether teardown was started.
    pub(crate) fn begin_destroy(&self) -> bool {
        if self.lifecycle() != Lifecycle::Live {
            return false;
        }
        self.set_lifecycle(Lifecycle::Destroying);
        true
    }

    /// `→ Destroyed` once the native window is gone.
    ///
    /// Fires the destroy callback, marks the window destroyed and removes it
    /// from the registry. Repeated calls do nothing.
    pub(crate) fn complete_destroy(&self) {
        if !self.lifecycle().has_native_window() {
            return;
        }
        self.set_lifecycle(Lifecycle::Destroying);

        fire!(self, destroy);

        self.set_lifecycle(Lifecycle::Destroyed);
        self.registry().unregister(self.handle());
        crate::log_debug!("window {} destroyed", self.handle());
    }
}
