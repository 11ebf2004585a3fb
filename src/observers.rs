//! Synchronous callback registry.
//!
//! Used for layout-state observers, root-marker observers and OS preference
//! watchers. Delivery happens on the caller's stack before `notify` returns.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifier returned on registration, used to unregister later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

type Callback<T> = Rc<RefCell<Box<dyn FnMut(&T)>>>;

/// Ordered set of callbacks receiving `&T`.
pub struct ObserverRegistry<T> {
    next_id: u64,
    entries: Vec<(ObserverId, Callback<T>)>,
}

impl<T> Default for ObserverRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for ObserverRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("len", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T> ObserverRegistry<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
        }
    }

    /// Registers a callback and returns its id.
    pub fn register(&mut self, callback: Box<dyn FnMut(&T)>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Rc::new(RefCell::new(callback))));
        id
    }

    /// Removes the callback with `id`. Returns false if it was not registered.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the callbacks registered right now, in registration order.
    ///
    /// Callers release their borrow of the registry before invoking the
    /// returned callbacks so that a callback may register or unregister.
    fn snapshot(&self) -> Vec<Callback<T>> {
        self.entries.iter().map(|(_, cb)| Rc::clone(cb)).collect()
    }
}

/// Invokes every callback registered in `registry` with `value`.
///
/// A callback that is already running further up the stack is skipped
/// rather than re-entered.
pub fn notify<T>(registry: &RefCell<ObserverRegistry<T>>, value: &T) {
    let callbacks = registry.borrow().snapshot();
    for callback in callbacks {
        match callback.try_borrow_mut() {
            Ok(mut callback) => callback(value),
            Err(_) => tracing::trace!("skipping re-entrant observer"),
        }
    }
}
