//! User-facing theme preference.

use serde::{Deserialize, Serialize};

/// Tri-state theme preference chosen by the user.
///
/// Persisted as the JSON strings `"light"`, `"dark"` and `"auto"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the operating system preference.
    #[default]
    Auto,
}

impl ThemeMode {
    /// All modes, in selector order.
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::Auto];

    /// Resolves this preference to the dark-mode flag actually applied.
    ///
    /// `os_dark` only matters for [`ThemeMode::Auto`].
    pub fn resolve(self, os_dark: bool) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            ThemeMode::Auto => os_dark,
        }
    }

    /// Maps the legacy boolean setting onto an explicit mode.
    pub fn from_dark_flag(is_dark: bool) -> Self {
        if is_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// Next mode in the light, dark, auto cycle.
    pub fn next(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Auto,
            ThemeMode::Auto => ThemeMode::Light,
        }
    }

    /// Human-readable name for selectors.
    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "Light",
            ThemeMode::Dark => "Dark",
            ThemeMode::Auto => "System",
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        })
    }
}
