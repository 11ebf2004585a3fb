//! In-process key-value store.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::traits::KeyValueStore;

/// Key-value store backed by a `HashMap`.
///
/// Used for headless sessions and tests. Counts writes per key so tests can
/// observe persistence traffic.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: HashMap<String, String>,
    writes: HashMap<String, usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with raw string values.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            data: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            writes: HashMap::new(),
        }
    }

    /// Number of `set_string` calls seen for `key`.
    pub fn write_count(&self, key: &str) -> usize {
        self.writes.get(key).copied().unwrap_or(0)
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        *self.writes.entry(key.to_string()).or_insert(0) += 1;
        self.data.insert(key.to_string(), value);
    }
}

/// Shared handle to a [`MemoryStore`].
///
/// The layout store takes ownership of its backend; cloning this handle
/// first lets the caller keep inspecting (or re-seeding) the same data.
#[derive(Debug, Clone, Default)]
pub struct SharedMemoryStore(Rc<RefCell<MemoryStore>>);

impl SharedMemoryStore {
    pub fn new(store: MemoryStore) -> Self {
        Self(Rc::new(RefCell::new(store)))
    }

    /// Runs `f` with read access to the underlying store.
    pub fn with<R>(&self, f: impl FnOnce(&MemoryStore) -> R) -> R {
        f(&self.0.borrow())
    }
}

impl KeyValueStore for SharedMemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.0.borrow().get_string(key)
    }

    fn set_string(&mut self, key: &str, value: String) {
        self.0.borrow_mut().set_string(key, value);
    }
}
