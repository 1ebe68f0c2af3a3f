//! Routing of raw platform messages to windows, and the blocking loop
//! that drives it.
//!
//! Everything here runs on the one thread that owns the registry.
//! Callbacks run to completion before the next message is retrieved.

use crate::event::{self, Handle, RawMessage, WindowEvent};
use crate::registry::Registry;

/// What the platform should do after a message was dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Fully handled; return 0 to the platform.
    Handled,
    /// Forward to the platform's default handler.
    Default,
    /// A close was accepted; destroy this native window.
    Destroy(Handle),
    /// The last window is gone; end the loop.
    Quit,
}

/// Translates messages and delivers them to registered windows.
#[derive(Debug, Default)]
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Dispatches one raw message.
    ///
    /// Messages with no domain meaning, and messages for handles the
    /// registry does not know (e.g. sent while a window is still being
    /// created), go to the default handler without reaching any callback.
    pub fn dispatch(&self, raw: &RawMessage) -> Disposition {
        let Some(event) = event::translate(raw) else {
            return Disposition::Default;
        };

        let disposition = match self.registry.lookup(raw.handle) {
            Some(window) => window.apply(event),
            None => {
                crate::log_debug!("dropped {event} for unknown window {}", raw.handle);
                Disposition::Default
            }
        };

        if event == WindowEvent::Destroy && self.should_quit() {
            crate::log_info!("all windows destroyed, quitting");
            return Disposition::Quit;
        }
        disposition
    }

    /// Quit only once some window has actually been retired, so an empty
    /// registry at startup never ends the loop.
    fn should_quit(&self) -> bool {
        self.registry.retired() > 0 && self.registry.all_destroyed()
    }
}

/// Side effects the dispatcher asks of the platform.
pub trait Backend {
    /// Tears down a native window. The platform then delivers its destroy
    /// notification.
    fn destroy_window(&self, handle: Handle);

    /// Makes the pending or next `MessageSource::next_message` return `None`.
    fn post_quit(&self);

    /// Runs the platform's default processing for a message.
    fn default_proc(&self, raw: &RawMessage) -> isize;
}

/// Dispatches a message and carries out the resulting disposition.
///
/// Returns the value the window procedure should hand back to the platform.
/// No registry or callback borrow is held while the backend runs, so the
/// backend may re-enter `route` (as Win32 does when destroying a window).
pub fn route(dispatcher: &Dispatcher, backend: &impl Backend, raw: &RawMessage) -> isize {
    match dispatcher.dispatch(raw) {
        Disposition::Handled => 0,
        Disposition::Default => backend.default_proc(raw),
        Disposition::Destroy(handle) => {
            backend.destroy_window(handle);
            0
        }
        Disposition::Quit => {
            backend.post_quit();
            0
        }
    }
}

/// A blocking source of platform messages.
pub trait MessageSource {
    /// Waits for the next message. Returns `None` once a quit was posted.
    fn next_message(&self) -> Option<RawMessage>;

    /// Hands a retrieved message to the window procedure, which ends in
    /// [`route`].
    ///
    /// `message` is always the one the preceding `next_message` call
    /// returned; [`run`] never reorders or skips.
    fn deliver(&self, message: &RawMessage);
}

/// Pumps messages until the source reports a quit.
///
/// There is no timeout and no other way out: the loop ends when the last
/// window has been destroyed. Returns the number of messages delivered.
pub fn run(source: &impl MessageSource) -> usize {
    let mut delivered = 0;
    while let Some(message) = source.next_message() {
        source.deliver(&message);
        delivered += 1;
    }
    crate::log_info!("message loop finished after {delivered} messages");
    delivered
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
