//! Observable layout record.
//!
//! [`LayoutState`] is the snapshot handed to observers. Fields are private
//! so that only the store can move it between states.

use serde::{Deserialize, Serialize};

use super::ThemeMode;

/// Snapshot of the dashboard layout preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutState {
    /// User preference, durable
    theme_mode: ThemeMode,
    /// Derived from `theme_mode` and the OS preference
    effective_dark_mode: bool,
    /// Durable sidebar preference
    is_sidebar_collapsed: bool,
    /// Per-session flag; persisted but not restored
    mobile_menu_open: bool,
}

impl LayoutState {
    /// Creates the initial state from persisted values.
    ///
    /// # Arguments
    /// * `theme_mode` - Persisted (or default) theme preference
    /// * `os_dark` - OS dark preference at construction time
    /// * `is_sidebar_collapsed` - Persisted (or default) sidebar flag
    pub fn new(theme_mode: ThemeMode, os_dark: bool, is_sidebar_collapsed: bool) -> Self {
        Self {
            theme_mode,
            effective_dark_mode: theme_mode.resolve(os_dark),
            is_sidebar_collapsed,
            mobile_menu_open: false,
        }
    }

    // ===== Queries =====

    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_mode
    }

    /// Returns the dark-mode flag that rendering should use.
    pub fn effective_dark_mode(&self) -> bool {
        self.effective_dark_mode
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.is_sidebar_collapsed
    }

    pub fn mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    // ===== Mutations (store only) =====

    pub(crate) fn apply_theme_mode(&mut self, mode: ThemeMode, os_dark: bool) {
        self.theme_mode = mode;
        self.effective_dark_mode = mode.resolve(os_dark);
    }

    /// Overwrites both fields from the legacy boolean setting.
    pub(crate) fn apply_legacy_dark(&mut self, is_dark: bool) {
        self.theme_mode = ThemeMode::from_dark_flag(is_dark);
        self.effective_dark_mode = is_dark;
    }

    /// Follows an OS preference change. Returns false when the current mode
    /// ignores the OS.
    pub(crate) fn apply_system_dark(&mut self, os_dark: bool) -> bool {
        if self.theme_mode != ThemeMode::Auto {
            return false;
        }
        self.effective_dark_mode = os_dark;
        true
    }

    pub(crate) fn set_sidebar_collapsed(&mut self, collapsed: bool) {
        self.is_sidebar_collapsed = collapsed;
    }

    pub(crate) fn set_mobile_menu_open(&mut self, open: bool) {
        self.mobile_menu_open = open;
    }
}
