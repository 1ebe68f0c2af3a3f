use std::fmt;

use serde::Serialize;

use crate::geometry::Vector;
use crate::input::{KeyCode, Modifiers, MouseButton};
use crate::window::DisplayState;

/// Raw platform message ids handled by the translator.
///
/// Values match the Win32 `WM_*` constants so the translator can be
/// exercised without linking against the platform.
pub mod msg {
    pub const WM_DESTROY: u32 = 0x0002;
    pub const WM_MOVE: u32 = 0x0003;
    pub const WM_SIZE: u32 = 0x0005;
    pub const WM_PAINT: u32 = 0x000F;
    pub const WM_CLOSE: u32 = 0x0010;
    pub const WM_CHAR: u32 = 0x0102;
    pub const WM_MOUSEMOVE: u32 = 0x0200;
    pub const WM_LBUTTONDOWN: u32 = 0x0201;
    pub const WM_RBUTTONDOWN: u32 = 0x0204;
    pub const WM_MBUTTONDOWN: u32 = 0x0207;
    pub const WM_MOUSEWHEEL: u32 = 0x020A;
    pub const WM_XBUTTONDOWN: u32 = 0x020B;

    pub const SIZE_RESTORED: usize = 0;
    pub const SIZE_MINIMIZED: usize = 1;
    pub const SIZE_MAXIMIZED: usize = 2;
}

/// An opaque native window handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Handle(pub usize);

impl Handle {
    pub const NULL: Self = Self(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// A message exactly as the platform delivered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage {
    pub handle: Handle,
    pub kind: u32,
    pub wparam: usize,
    pub lparam: isize,
}

impl RawMessage {
    pub fn new(handle: Handle, kind: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            handle,
            kind,
            wparam,
            lparam,
        }
    }
}

/// A translated window event.
///
/// Produced by [`translate`] and consumed by the dispatcher with an
/// exhaustive match; each variant maps to one callback slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WindowEvent {
    /// The client area needs repainting.
    Paint,

    /// The cursor moved over the client area.
    MouseMove { position: Vector },

    /// A mouse button was pressed.
    MouseClick {
        button: MouseButton,
        position: Vector,
        modifiers: Modifiers,
    },

    /// The wheel turned; only the direction is kept.
    MouseScroll { forward: bool },

    /// A character key was typed.
    Key { key: KeyCode },

    /// The window moved; `position` is the client-area origin.
    Move { position: Vector },

    /// The client area was resized or the window was minimized,
    /// maximized or restored.
    Resize { size: Vector, state: DisplayState },

    /// The user or the caller asked the window to close.
    Close,

    /// The native window is being torn down.
    Destroy,
}

impl fmt::Display for WindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paint => f.write_str("paint"),
            Self::MouseMove { position } => write!(f, "mouse-move ({}, {})", position.x, position.y),
            Self::MouseClick {
                button,
                position,
                modifiers,
            } => write!(
                f,
                "mouse-click {button:?} ({}, {}) ctrl={} shift={}",
                position.x, position.y, modifiers.control, modifiers.shift
            ),
            Self::MouseScroll { forward } => {
                let dir = if *forward { "forward" } else { "backward" };
                write!(f, "mouse-scroll {dir}")
            }
            Self::Key { key } => write!(f, "key {key}"),
            Self::Move { position } => write!(f, "move ({}, {})", position.x, position.y),
            Self::Resize { size, state } => write!(f, "resize {}x{} {state:?}", size.x, size.y),
            Self::Close => f.write_str("close"),
            Self::Destroy => f.write_str("destroy"),
        }
    }
}

/// Translates a raw platform message into a `WindowEvent`.
///
/// Returns `None` for messages without a domain meaning; those must be
/// forwarded to the platform's default handler unchanged.
pub fn translate(raw: &RawMessage) -> Option<WindowEvent> {
    use msg::*;

    match raw.kind {
        WM_PAINT => Some(WindowEvent::Paint),
        WM_MOUSEMOVE => Some(WindowEvent::MouseMove {
            position: Vector::unpack(raw.lparam),
        }),
        WM_LBUTTONDOWN | WM_RBUTTONDOWN | WM_MBUTTONDOWN | WM_XBUTTONDOWN => {
            Some(WindowEvent::MouseClick {
                button: pressed_button(raw.wparam),
                position: Vector::unpack(raw.lparam),
                modifiers: Modifiers::from_bits(raw.wparam),
            })
        }
        WM_MOUSEWHEEL => Some(WindowEvent::MouseScroll {
            forward: wheel_delta(raw.wparam) > 0,
        }),
        WM_CHAR => KeyCode::from_code(raw.wparam).map(|key| WindowEvent::Key { key }),
        WM_MOVE => Some(WindowEvent::Move {
            position: Vector::unpack(raw.lparam),
        }),
        WM_SIZE => Some(WindowEvent::Resize {
            size: Vector::unpack(raw.lparam),
            state: resize_state(raw.wparam),
        }),
        WM_CLOSE => Some(WindowEvent::Close),
        WM_DESTROY => Some(WindowEvent::Destroy),
        _ => None,
    }
}

/// Picks the first pressed button in priority order.
///
/// Only one button is reported even when several bits are set. A field
/// with no button bit at all falls back to `Left`.
fn pressed_button(bits: usize) -> MouseButton {
    MouseButton::PRIORITY
        .into_iter()
        .find(|b| bits & b.mask() != 0)
        .unwrap_or(MouseButton::Left)
}

/// The signed wheel delta stored in the high word.
fn wheel_delta(wparam: usize) -> i16 {
    ((wparam >> 16) & 0xFFFF) as u16 as i16
}

fn resize_state(kind: usize) -> DisplayState {
    match kind {
        msg::SIZE_MINIMIZED => DisplayState::Minimized,
        msg::SIZE_MAXIMIZED => DisplayState::Maximized,
        // SIZE_RESTORED, plus the popup/overlap notifications nobody asked for.
        _ => DisplayState::Restored,
    }
}
