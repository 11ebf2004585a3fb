//! The theme/layout state store.
//!
//! [`ThemeLayoutStore`] owns the layout preferences of one session. It seeds
//! itself from durable storage, keeps the effective dark mode in step with
//! the OS preference while the user has chosen "auto", writes every change
//! back to storage and notifies observers synchronously.
//!
//! The store is a cheap, cloneable handle; all clones refer to the same
//! state. It is single-threaded (`!Send`) and every operation completes
//! before returning.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::observers::{self, ObserverId, ObserverRegistry};
use crate::state::{LayoutState, RootMarker, ThemeMode};
use crate::storage::settings;
use crate::traits::{KeyValueStore, SystemThemeSource, WatchHandle};

/// Storage key of the persisted [`ThemeMode`].
pub const THEME_MODE_KEY: &str = "themeMode";
/// Storage key of the sidebar-collapsed flag.
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebarCollapsed";
/// Storage key of the mobile-menu flag. Written, never read back.
pub const MOBILE_MENU_KEY: &str = "mobileMenu";

struct StoreInner {
    state: RefCell<LayoutState>,
    storage: RefCell<Box<dyn KeyValueStore>>,
    // Dropped with the store, which unregisters the OS watch.
    system_watch: RefCell<WatchHandle>,
    system: Rc<dyn SystemThemeSource>,
    observers: RefCell<ObserverRegistry<LayoutState>>,
    root_markers: RefCell<ObserverRegistry<RootMarker>>,
    // States waiting to be delivered, oldest first.
    pending: RefCell<VecDeque<LayoutState>>,
    // True while the outermost mutation is draining `pending`.
    delivering: Cell<bool>,
}

/// Shared handle to the session's layout state.
///
/// Observers registered here must not hold a strong clone of the store, or
/// the store (and its OS watch) will outlive the session.
#[derive(Clone)]
pub struct ThemeLayoutStore {
    inner: Rc<StoreInner>,
}

impl std::fmt::Debug for ThemeLayoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeLayoutStore")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl ThemeLayoutStore {
    /// Creates the store for a session.
    ///
    /// Reads `themeMode` (default auto) and `sidebarCollapsed` (default
    /// false) from `storage`, starts with the mobile menu closed, derives the
    /// effective dark mode and starts watching `system` for the lifetime of
    /// the store.
    ///
    /// # Arguments
    /// * `storage` - Durable key-value backend, owned by the store
    /// * `system` - OS dark-mode preference source
    pub fn new(storage: impl KeyValueStore + 'static, system: Rc<dyn SystemThemeSource>) -> Self {
        let theme_mode = settings::load_setting_or(&storage, THEME_MODE_KEY, ThemeMode::Auto);
        let sidebar_collapsed = settings::load_setting_or(&storage, SIDEBAR_COLLAPSED_KEY, false);
        let state = LayoutState::new(theme_mode, system.is_dark_preferred(), sidebar_collapsed);

        tracing::debug!(
            theme_mode = %state.theme_mode(),
            effective_dark = state.effective_dark_mode(),
            sidebar_collapsed,
            "layout store initialized"
        );

        let inner = Rc::new(StoreInner {
            state: RefCell::new(state),
            storage: RefCell::new(Box::new(storage)),
            system_watch: RefCell::new(WatchHandle::noop()),
            system,
            observers: RefCell::new(ObserverRegistry::new()),
            root_markers: RefCell::new(ObserverRegistry::new()),
            pending: RefCell::new(VecDeque::new()),
            delivering: Cell::new(false),
        });

        let weak: Weak<StoreInner> = Rc::downgrade(&inner);
        let handle = inner.system.watch(Box::new(move |dark| {
            if let Some(inner) = weak.upgrade() {
                ThemeLayoutStore { inner }.on_system_theme_change(dark);
            }
        }));
        *inner.system_watch.borrow_mut() = handle;

        Self { inner }
    }

    // ===== Queries =====

    /// Returns the current state.
    pub fn snapshot(&self) -> LayoutState {
        *self.inner.state.borrow()
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.snapshot().theme_mode()
    }

    pub fn effective_dark_mode(&self) -> bool {
        self.snapshot().effective_dark_mode()
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.snapshot().is_sidebar_collapsed()
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.snapshot().mobile_menu_open()
    }

    /// Returns true while the OS preference watch is registered.
    pub fn is_watching_system(&self) -> bool {
        self.inner.system_watch.borrow().is_active()
    }

    // ===== Actions =====

    /// Sets the user's theme preference and persists it.
    ///
    /// The OS preference is queried only for [`ThemeMode::Auto`].
    pub fn set_theme_mode(&self, mode: ThemeMode) {
        let os_dark = mode == ThemeMode::Auto && self.inner.system.is_dark_preferred();
        tracing::debug!(%mode, "set theme mode");

        self.mutate(
            |state| state.apply_theme_mode(mode, os_dark),
            |store| store.persist(THEME_MODE_KEY, &mode),
        );
    }

    /// Backward-compatible boolean dark-mode setter.
    ///
    /// Stores dark or light as the theme mode and sets the effective dark
    /// mode to exactly `is_dark` without consulting the OS. Also emits a
    /// [`RootMarker`] to root-marker observers, who stand in for the global
    /// document-root class.
    pub fn set_dark_mode_legacy(&self, is_dark: bool) {
        let mode = ThemeMode::from_dark_flag(is_dark);
        tracing::debug!(is_dark, "set dark mode (legacy)");

        self.mutate(
            |state| state.apply_legacy_dark(is_dark),
            |store| store.persist(THEME_MODE_KEY, &mode),
        );
        observers::notify(&self.inner.root_markers, &RootMarker::from_dark_flag(is_dark));
    }

    /// Applies an OS preference change. Ignored unless the mode is auto.
    pub fn on_system_theme_change(&self, is_dark: bool) {
        let mut followed = false;
        self.mutate(|state| followed = state.apply_system_dark(is_dark), |_| {});
        tracing::debug!(is_dark, followed, "system theme changed");
    }

    /// Sets and persists the sidebar-collapsed flag.
    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.mutate(
            |state| state.set_sidebar_collapsed(collapsed),
            |store| store.persist(SIDEBAR_COLLAPSED_KEY, &collapsed),
        );
    }

    /// Sets the mobile-menu flag and writes it under `mobileMenu`.
    ///
    /// The flag is not restored by [`ThemeLayoutStore::new`]; every session
    /// starts with the menu closed.
    pub fn set_mobile_menu_open(&self, open: bool) {
        self.mutate(
            |state| state.set_mobile_menu_open(open),
            |store| store.persist(MOBILE_MENU_KEY, &open),
        );
    }

    pub fn toggle_sidebar(&self) {
        self.set_sidebar_collapsed(!self.is_sidebar_collapsed());
    }

    pub fn toggle_mobile_menu(&self) {
        self.set_mobile_menu_open(!self.mobile_menu_open());
    }

    /// Advances light → dark → auto → light.
    pub fn cycle_theme_mode(&self) {
        self.set_theme_mode(self.theme_mode().next());
    }

    // ===== Observers =====

    /// Registers `callback` to receive every new state.
    ///
    /// Callbacks run synchronously, in registration order, before the
    /// mutating call returns. They may read or mutate the store; a change
    /// made from inside a callback is delivered to every observer after the
    /// current state has reached all of them.
    pub fn subscribe(&self, callback: impl FnMut(&LayoutState) + 'static) -> ObserverId {
        self.inner.observers.borrow_mut().register(Box::new(callback))
    }

    /// Removes a state observer. Returns false if `id` was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.inner.observers.borrow_mut().unregister(id)
    }

    /// Registers `callback` for document-root marker changes.
    pub fn subscribe_root_marker(&self, callback: impl FnMut(&RootMarker) + 'static) -> ObserverId {
        self.inner.root_markers.borrow_mut().register(Box::new(callback))
    }

    pub fn unsubscribe_root_marker(&self, id: ObserverId) -> bool {
        self.inner.root_markers.borrow_mut().unregister(id)
    }

    // ===== Internals =====

    /// Applies `change`, runs `persist`, then notifies observers if the
    /// state actually changed. No borrow is held while observers run.
    fn mutate(&self, change: impl FnOnce(&mut LayoutState), persist: impl FnOnce(&Self)) {
        let (before, after) = {
            let mut state = self.inner.state.borrow_mut();
            let before = *state;
            change(&mut state);
            (before, *state)
        };

        persist(self);

        if before != after {
            self.inner.pending.borrow_mut().push_back(after);
            self.deliver_pending();
        }
    }

    /// Delivers queued states to all observers in FIFO order.
    ///
    /// Only the outermost call drains; a mutation made by an observer just
    /// queues its state behind the one being delivered.
    fn deliver_pending(&self) {
        if self.inner.delivering.replace(true) {
            return;
        }
        let _guard = DeliveryGuard(&self.inner.delivering);

        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(state) = next else { break };
            observers::notify(&self.inner.observers, &state);
        }
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        let mut storage = self.inner.storage.borrow_mut();
        settings::save_setting(&mut **storage, key, value);
    }
}

/// Clears the delivering flag even if an observer panics.
struct DeliveryGuard<'a>(&'a Cell<bool>);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, SharedMemoryStore};
    use crate::system_theme::{HeadlessSystemTheme, PolledSystemTheme};

    type Fixture = (ThemeLayoutStore, SharedMemoryStore, Rc<PolledSystemTheme>);

    fn store_with(storage: MemoryStore, os_dark: bool) -> Fixture {
        let shared = SharedMemoryStore::new(storage);
        let system = Rc::new(PolledSystemTheme::new(os_dark));
        let store = ThemeLayoutStore::new(shared.clone(), system.clone());
        (store, shared, system)
    }

    #[test]
    fn test_defaults_without_persisted_data() {
        let (store, _, _) = store_with(MemoryStore::new(), false);
        let state = store.snapshot();

        assert_eq!(state.theme_mode(), ThemeMode::Auto);
        assert!(!state.effective_dark_mode());
        assert!(!state.is_sidebar_collapsed());
        assert!(!state.mobile_menu_open());
    }

    #[test]
    fn test_set_theme_mode_persists_every_mode() {
        let (store, shared, _) = store_with(MemoryStore::new(), true);

        for mode in ThemeMode::ALL {
            store.set_theme_mode(mode);
            assert_eq!(store.theme_mode(), mode);
            let persisted: Option<ThemeMode> = settings::try_load_setting(&shared, THEME_MODE_KEY);
            assert_eq!(persisted, Some(mode));
        }
    }

    #[test]
    fn test_effective_dark_mode_truth_table() {
        for os_dark in [false, true] {
            let (store, _, _) = store_with(MemoryStore::new(), os_dark);
            for mode in ThemeMode::ALL {
                store.set_theme_mode(mode);
                let expected = mode == ThemeMode::Dark || (mode == ThemeMode::Auto && os_dark);
                assert_eq!(store.effective_dark_mode(), expected, "mode={mode} os_dark={os_dark}");
            }
        }
    }

    #[test]
    fn test_system_change_ignored_unless_auto() {
        let (store, _, _) = store_with(MemoryStore::new(), false);

        for mode in [ThemeMode::Light, ThemeMode::Dark] {
            store.set_theme_mode(mode);
            let before = store.effective_dark_mode();
            for x in [false, true] {
                store.on_system_theme_change(x);
                assert_eq!(store.effective_dark_mode(), before);
            }
        }

        store.set_theme_mode(ThemeMode::Auto);
        for x in [true, false, true] {
            store.on_system_theme_change(x);
            assert_eq!(store.effective_dark_mode(), x);
        }
    }

    #[test]
    fn test_legacy_dark_matches_dark_mode() {
        let (store, shared, _) = store_with(MemoryStore::new(), false);

        store.set_dark_mode_legacy(true);
        assert_eq!(store.theme_mode(), ThemeMode::Dark);
        assert!(store.effective_dark_mode());
        assert_eq!(shared.get_string(THEME_MODE_KEY).as_deref(), Some("\"dark\""));

        store.set_dark_mode_legacy(false);
        assert_eq!(store.theme_mode(), ThemeMode::Light);
        assert!(!store.effective_dark_mode());
    }

    #[test]
    fn test_legacy_dark_does_not_query_os() {
        // OS says dark, legacy path says light: the literal input wins.
        let (store, _, _) = store_with(MemoryStore::new(), true);
        assert!(store.effective_dark_mode());

        store.set_dark_mode_legacy(false);
        assert!(!store.effective_dark_mode());
    }

    #[test]
    fn test_legacy_dark_emits_root_marker() {
        let (store, _, _) = store_with(MemoryStore::new(), false);
        let markers = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&markers);
        store.subscribe_root_marker(move |marker: &RootMarker| sink.borrow_mut().push(marker.as_class()));

        store.set_dark_mode_legacy(true);
        store.set_theme_mode(ThemeMode::Light);
        store.set_dark_mode_legacy(false);

        assert_eq!(*markers.borrow(), vec!["dark", "light"]);
    }

    #[test]
    fn test_sidebar_idempotent() {
        let (store, shared, _) = store_with(MemoryStore::new(), false);
        let notifications = Rc::new(Cell::new(0));
        let counter = Rc::clone(&notifications);
        store.subscribe(move |_| counter.set(counter.get() + 1));

        store.set_sidebar_collapsed(true);
        let after_first = store.snapshot();
        store.set_sidebar_collapsed(true);

        assert_eq!(store.snapshot(), after_first);
        assert_eq!(notifications.get(), 1);
        assert_eq!(shared.get_string(SIDEBAR_COLLAPSED_KEY).as_deref(), Some("true"));
    }

    #[test]
    fn test_corrupt_sidebar_value_defaults_to_expanded() {
        let storage = MemoryStore::with_entries([(SIDEBAR_COLLAPSED_KEY, "not-a-bool")]);
        let (store, _, _) = store_with(storage, false);
        assert!(!store.is_sidebar_collapsed());
    }

    #[test]
    fn test_mobile_menu_is_persisted_but_not_restored() {
        // Inherited behavior: the flag is written on change but every session
        // starts with the menu closed.
        let storage = MemoryStore::with_entries([(MOBILE_MENU_KEY, "true")]);
        let (store, shared, _) = store_with(storage, false);
        assert!(!store.mobile_menu_open());

        store.set_mobile_menu_open(true);
        assert!(store.mobile_menu_open());
        assert_eq!(shared.get_string(MOBILE_MENU_KEY).as_deref(), Some("true"));

        store.toggle_mobile_menu();
        assert_eq!(shared.get_string(MOBILE_MENU_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn test_observers_see_new_state_before_return() {
        let (store, _, _) = store_with(MemoryStore::new(), false);
        let last = Rc::new(Cell::new(None));
        let sink = Rc::clone(&last);
        let id = store.subscribe(move |state: &LayoutState| sink.set(Some(*state)));

        store.toggle_sidebar();
        assert_eq!(last.get(), Some(store.snapshot()));

        assert!(store.unsubscribe(id));
        store.toggle_sidebar();
        assert_ne!(last.get(), Some(store.snapshot()));
    }

    #[test]
    fn test_observer_may_mutate_store() {
        let (store, _, _) = store_with(MemoryStore::new(), false);
        let weak = Rc::downgrade(&store.inner);
        store.subscribe(move |state: &LayoutState| {
            if state.mobile_menu_open() {
                if let Some(inner) = weak.upgrade() {
                    ThemeLayoutStore { inner }.set_sidebar_collapsed(true);
                }
            }
        });

        store.set_mobile_menu_open(true);
        assert!(store.is_sidebar_collapsed());
    }

    #[test]
    fn test_nested_change_reaches_every_observer_in_order() {
        let (store, _, _) = store_with(MemoryStore::new(), false);
        let weak = Rc::downgrade(&store.inner);
        let first_seen = Rc::new(RefCell::new(Vec::new()));
        let second_seen = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&first_seen);
        store.subscribe(move |state: &LayoutState| {
            sink.borrow_mut().push(*state);
            if state.mobile_menu_open() && !state.is_sidebar_collapsed() {
                if let Some(inner) = weak.upgrade() {
                    ThemeLayoutStore { inner }.set_sidebar_collapsed(true);
                }
            }
        });
        let sink = Rc::clone(&second_seen);
        store.subscribe(move |state: &LayoutState| sink.borrow_mut().push(*state));

        store.set_mobile_menu_open(true);

        let current = store.snapshot();
        assert!(current.is_sidebar_collapsed());
        for seen in [&first_seen, &second_seen] {
            let seen = seen.borrow();
            assert_eq!(seen.len(), 2);
            assert!(seen[0].mobile_menu_open() && !seen[0].is_sidebar_collapsed());
            assert_eq!(seen[1], current);
        }
    }

    #[test]
    fn test_delivery_resumes_after_nested_change() {
        let (store, _, _) = store_with(MemoryStore::new(), false);
        let weak = Rc::downgrade(&store.inner);
        let last = Rc::new(Cell::new(None));

        store.subscribe(move |state: &LayoutState| {
            if state.is_sidebar_collapsed() && !state.mobile_menu_open() {
                if let Some(inner) = weak.upgrade() {
                    ThemeLayoutStore { inner }.set_mobile_menu_open(true);
                }
            }
        });
        let sink = Rc::clone(&last);
        store.subscribe(move |state: &LayoutState| sink.set(Some(*state)));

        store.set_sidebar_collapsed(true);
        assert_eq!(last.get(), Some(store.snapshot()));

        // A later, unrelated change still notifies.
        store.set_theme_mode(ThemeMode::Dark);
        assert_eq!(last.get(), Some(store.snapshot()));
    }

    #[test]
    fn test_cycle_theme_mode() {
        let storage = MemoryStore::with_entries([(THEME_MODE_KEY, "\"light\"")]);
        let (store, _, _) = store_with(storage, false);

        store.cycle_theme_mode();
        assert_eq!(store.theme_mode(), ThemeMode::Dark);
        store.cycle_theme_mode();
        assert_eq!(store.theme_mode(), ThemeMode::Auto);
    }

    #[test]
    fn test_os_watch_follows_and_is_disposed_on_drop() {
        let (store, _, system) = store_with(MemoryStore::new(), false);
        assert!(store.is_watching_system());
        assert_eq!(system.watcher_count(), 1);

        system.set_dark_preferred(true);
        assert!(store.effective_dark_mode());

        let clone = store.clone();
        drop(store);
        assert_eq!(system.watcher_count(), 1);
        drop(clone);
        assert_eq!(system.watcher_count(), 0);
    }

    #[test]
    fn test_headless_source_defaults_to_light() {
        let store = ThemeLayoutStore::new(MemoryStore::new(), Rc::new(HeadlessSystemTheme));
        assert_eq!(store.theme_mode(), ThemeMode::Auto);
        assert!(!store.effective_dark_mode());
        assert!(!store.is_watching_system());
    }
}
