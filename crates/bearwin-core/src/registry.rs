//! Handle-to-window lookup table used to route platform messages.
//!
//! The registry only holds non-owning references; windows are owned by
//! whoever built them. It is `!Send` by construction (`Rc`), so it can
//! only ever be touched from the thread running the dispatch loop.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::event::Handle;
use crate::window::LogicalWindow;

/// Why a window could not be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Construction never produced a native handle.
    NullHandle,
    /// Another live entry already uses this handle.
    Duplicate(Handle),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullHandle => f.write_str("cannot register a window without a native handle"),
            Self::Duplicate(h) => write!(f, "handle {h} is already registered"),
        }
    }
}

impl std::error::Error for RegistryError {}

struct Entry {
    handle: Handle,
    window: Weak<LogicalWindow>,
}

impl Entry {
    /// Destroyed, or dropped by its owner without unregistering.
    fn is_destroyed(&self) -> bool {
        self.window.upgrade().is_none_or(|w| w.is_destroyed())
    }
}

/// Shared registry of live windows, in registration order.
///
/// Cloning yields another handle to the same table.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Rc<RefCell<Vec<Entry>>>,
    retired: Rc<Cell<usize>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a window under its handle.
    pub fn register(&self, handle: Handle, window: &Rc<LogicalWindow>) -> Result<(), RegistryError> {
        if handle.is_null() {
            return Err(RegistryError::NullHandle);
        }
        let mut entries = self.entries.borrow_mut();
        if entries.iter().any(|e| e.handle == handle) {
            return Err(RegistryError::Duplicate(handle));
        }
        entries.push(Entry {
            handle,
            window: Rc::downgrade(window),
        });
        Ok(())
    }

    /// Resolves a handle to its window.
    ///
    /// Returns `None` for unknown handles and for windows that are already
    /// destroyed, so a message can never reach a window that is gone.
    pub fn lookup(&self, handle: Handle) -> Option<Rc<LogicalWindow>> {
        let entries = self.entries.borrow();
        let entry = entries.iter().find(|e| e.handle == handle)?;
        let window = entry.window.upgrade()?;
        if window.is_destroyed() {
            return None;
        }
        Some(window)
    }

    /// Removes a handle. Removing an absent handle does nothing.
    pub fn unregister(&self, handle: Handle) {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|e| e.handle != handle);
        if entries.len() < before {
            self.retired.set(self.retired.get() + 1);
        }
    }

    /// How many windows have been removed over the registry's lifetime.
    pub fn retired(&self) -> usize {
        self.retired.get()
    }

    /// Whether a handle has an entry, destroyed or not.
    pub fn contains(&self, handle: Handle) -> bool {
        self.entries.borrow().iter().any(|e| e.handle == handle)
    }

    /// True when every registered window is destroyed.
    ///
    /// An empty registry is vacuously "all destroyed"; the dispatcher only
    /// asks after it has seen a destroy notification.
    pub fn all_destroyed(&self) -> bool {
        self.entries.borrow().iter().all(Entry::is_destroyed)
    }

    /// Registered handles in registration order.
    pub fn handles(&self) -> Vec<Handle> {
        self.entries.borrow().iter().map(|e| e.handle).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.handles()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Lifecycle;

    fn window(handle: usize) -> Rc<LogicalWindow> {
        Rc::new(LogicalWindow::detached(Handle(handle), Lifecycle::Live))
    }

    #[test]
    fn lookup_of_unregistered_handle_is_empty() {
        // Arrange
        let registry = Registry::new();
        let w = window(1);
        registry.register(Handle(1), &w).unwrap();

        // Assert
        assert!(registry.lookup(Handle(2)).is_none());
        assert!(registry.lookup(Handle::NULL).is_none());
    }

    #[test]
    fn register_then_lookup_returns_same_window() {
        let registry = Registry::new();
        let w = window(7);

        registry.register(Handle(7), &w).unwrap();

        let found = registry.lookup(Handle(7)).unwrap();
        assert!(Rc::ptr_eq(&found, &w));
    }

    #[test]
    fn register_unregister_round_trip() {
        // Arrange
        let registry = Registry::new();
        let w = window(3);

        // Act
        registry.register(Handle(3), &w).unwrap();
        registry.unregister(Handle(3));

        // Assert
        assert!(registry.lookup(Handle(3)).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn unregister_twice_is_a_no_op() {
        // Arrange
        let registry = Registry::new();
        let a = window(1);
        let b = window(2);
        registry.register(Handle(1), &a).unwrap();
        registry.register(Handle(2), &b).unwrap();

        // Act
        registry.unregister(Handle(1));
        registry.unregister(Handle(1));

        // Assert
        assert_eq!(registry.handles(), vec![Handle(2)]);
        assert_eq!(registry.retired(), 1);
    }

    #[test]
    fn duplicate_handle_is_rejected() {
        // Arrange
        let registry = Registry::new();
        let first = window(5);
        let second = window(5);
        registry.register(Handle(5), &first).unwrap();

        // Act
        let result = registry.register(Handle(5), &second);

        // Assert
        assert_eq!(result, Err(RegistryError::Duplicate(Handle(5))));
        assert_eq!(registry.len(), 1);
        assert!(Rc::ptr_eq(&registry.lookup(Handle(5)).unwrap(), &first));
    }

    #[test]
    fn null_handle_is_rejected() {
        let registry = Registry::new();
        let w = window(0);

        assert_eq!(
            registry.register(Handle::NULL, &w),
            Err(RegistryError::NullHandle)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn lookup_skips_destroyed_windows() {
        // Arrange
        let registry = Registry::new();
        let w = Rc::new(LogicalWindow::detached(Handle(9), Lifecycle::Destroyed));
        registry.register(Handle(9), &w).unwrap();

        // Assert
        assert!(registry.contains(Handle(9)));
        assert!(registry.lookup(Handle(9)).is_none());
    }

    #[test]
    fn lookup_skips_dropped_windows() {
        let registry = Registry::new();
        let w = window(4);
        registry.register(Handle(4), &w).unwrap();

        drop(w);

        assert!(registry.lookup(Handle(4)).is_none());
        assert!(registry.all_destroyed());
    }

    #[test]
    fn all_destroyed_tracks_every_window() {
        // Arrange
        let registry = Registry::new();
        let a = window(1);
        let b = window(2);
        registry.register(Handle(1), &a).unwrap();
        registry.register(Handle(2), &b).unwrap();

        // Act / Assert
        assert!(!registry.all_destroyed());
        a.set_lifecycle(Lifecycle::Destroyed);
        assert!(!registry.all_destroyed());
        b.set_lifecycle(Lifecycle::Destroyed);
        assert!(registry.all_destroyed());

        // A new live window flips the reading back.
        let c = window(3);
        registry.register(Handle(3), &c).unwrap();
        assert!(!registry.all_destroyed());
    }

    #[test]
    fn empty_registry_is_vacuously_all_destroyed() {
        assert!(Registry::new().all_destroyed());
    }

    #[test]
    fn clones_share_the_same_table() {
        let registry = Registry::new();
        let view = registry.clone();
        let w = window(11);

        registry.register(Handle(11), &w).unwrap();

        assert!(view.lookup(Handle(11)).is_some());
    }
}
