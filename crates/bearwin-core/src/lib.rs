pub mod builder;
pub mod config;
pub mod dispatch;
pub mod event;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod log;
pub mod platform;
pub mod registry;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::WindowBuilder;
pub use config::Config;
pub use dispatch::{Backend, Dispatcher, Disposition, MessageSource};
pub use event::{Handle, RawMessage, WindowEvent};
pub use geometry::{Rect, Vector};
pub use input::{Cursor, KeyCode, Modifiers, MouseButton, PointerShape};
pub use lifecycle::Lifecycle;
pub use platform::{ClassDescriptor, CreateParams, Platform, Surface, WindowResult};
pub use registry::{Registry, RegistryError};
pub use window::{DisplayState, LogicalWindow, Style, Window};
