//! Collaborator seams of the layout store.
//!
//! The store never touches a concrete backend directly. Durable storage and
//! the OS dark-mode preference both sit behind the traits in this module so
//! that a GUI host, a headless session and the tests can each plug in their
//! own implementation.

/// String-keyed durable storage.
///
/// Mirrors the shape of `eframe::Storage`: values are plain strings (the
/// store writes JSON-encoded scalars into them) and writes become durable on
/// [`KeyValueStore::flush`].
pub trait KeyValueStore {
    /// Returns the raw string stored under `key`, if any.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set_string(&mut self, key: &str, value: String);

    /// Writes pending changes to the backing medium.
    ///
    /// Failures are absorbed by the implementation; callers never see them.
    fn flush(&mut self) {}
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get_string(&self, key: &str) -> Option<String> {
        (**self).get_string(key)
    }

    fn set_string(&mut self, key: &str, value: String) {
        (**self).set_string(key, value);
    }

    fn flush(&mut self) {
        (**self).flush();
    }
}

/// Source of the operating system's dark-mode preference.
pub trait SystemThemeSource {
    /// Returns true when the OS currently prefers a dark appearance.
    fn is_dark_preferred(&self) -> bool;

    /// Registers `callback` to run with the new preference every time it
    /// changes. The returned handle unregisters the callback when disposed
    /// or dropped.
    fn watch(&self, callback: Box<dyn FnMut(bool)>) -> WatchHandle;
}

/// Disposal handle for an OS preference watch.
///
/// Dropping the handle disposes it; [`WatchHandle::dispose`] does the same
/// explicitly. A no-op handle is returned by sources that cannot watch.
#[must_use = "dropping a WatchHandle immediately unregisters the watch"]
pub struct WatchHandle {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl WatchHandle {
    /// Creates a handle that runs `dispose` exactly once.
    pub fn new(dispose: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: Some(Box::new(dispose)),
        }
    }

    /// Creates a handle with nothing to dispose.
    pub fn noop() -> Self {
        Self { dispose: None }
    }

    /// Returns true until the handle has been disposed.
    pub fn is_active(&self) -> bool {
        self.dispose.is_some()
    }

    /// Unregisters the watch. Calling this more than once is harmless.
    pub fn dispose(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("active", &self.is_active())
            .finish()
    }
}
