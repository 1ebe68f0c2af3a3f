/// Key code to virtual key mapping.
pub mod keys;

#[cfg(windows)]
mod class;

/// Message loop and window procedure.
#[cfg(windows)]
pub mod event_loop;

#[cfg(windows)]
mod frame;

/// Monitor queries.
#[cfg(windows)]
pub mod monitor;

#[cfg(windows)]
mod resources;

#[cfg(windows)]
mod surface;

#[cfg(windows)]
pub use event_loop::EventLoop;
