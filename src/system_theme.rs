//! OS dark-mode preference sources.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::observers::{self, ObserverRegistry};
use crate::traits::{SystemThemeSource, WatchHandle};

/// Source for environments without an OS preference API.
///
/// Always reports light; watching succeeds but never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessSystemTheme;

impl SystemThemeSource for HeadlessSystemTheme {
    fn is_dark_preferred(&self) -> bool {
        false
    }

    fn watch(&self, _callback: Box<dyn FnMut(bool)>) -> WatchHandle {
        WatchHandle::noop()
    }
}

/// Source whose value is pushed in by the host.
///
/// A GUI host reads the OS theme once per frame and calls
/// [`PolledSystemTheme::set_dark_preferred`]; watchers fire only on actual
/// changes.
#[derive(Debug, Default)]
pub struct PolledSystemTheme {
    dark: Cell<bool>,
    watchers: Rc<RefCell<ObserverRegistry<bool>>>,
}

impl PolledSystemTheme {
    pub fn new(initially_dark: bool) -> Self {
        Self {
            dark: Cell::new(initially_dark),
            watchers: Rc::default(),
        }
    }

    /// Records the current OS preference, notifying watchers if it changed.
    ///
    /// Returns true when the value changed.
    pub fn set_dark_preferred(&self, dark: bool) -> bool {
        if self.dark.replace(dark) == dark {
            return false;
        }
        tracing::debug!(dark, "OS theme preference changed");
        observers::notify(&self.watchers, &dark);
        true
    }

    /// Number of live watches.
    pub fn watcher_count(&self) -> usize {
        self.watchers.borrow().len()
    }
}

impl SystemThemeSource for PolledSystemTheme {
    fn is_dark_preferred(&self) -> bool {
        self.dark.get()
    }

    fn watch(&self, mut callback: Box<dyn FnMut(bool)>) -> WatchHandle {
        let id = self
            .watchers
            .borrow_mut()
            .register(Box::new(move |dark: &bool| callback(*dark)));

        let watchers = Rc::downgrade(&self.watchers);
        WatchHandle::new(move || {
            if let Some(watchers) = watchers.upgrade() {
                watchers.borrow_mut().unregister(id);
            }
        })
    }
}
