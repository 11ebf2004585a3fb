//! Typed settings over a [`KeyValueStore`].
//!
//! Every value is stored as a JSON string under its key. Loading never fails:
//! a missing key or a value that does not parse yields the caller's default.

use serde::{Deserialize, Serialize};

use crate::traits::KeyValueStore;

/// Loads a setting from storage with a default fallback.
///
/// # Type Parameters
/// * `T` - The type to deserialize, must implement Deserialize and Default
///
/// # Arguments
/// * `storage` - The key-value store
/// * `key` - The storage key for this setting
///
/// # Returns
/// The deserialized value if found and valid, otherwise `T::default()`
pub fn load_setting<T>(storage: &dyn KeyValueStore, key: &str) -> T
where
    T: for<'de> Deserialize<'de> + Default,
{
    load_setting_or(storage, key, T::default())
}

/// Loads a setting from storage with a custom default.
///
/// A value that is present but malformed is logged and replaced by
/// `default`; it is left in storage untouched.
///
/// # Arguments
/// * `storage` - The key-value store
/// * `key` - The storage key for this setting
/// * `default` - The value to use if loading fails
pub fn load_setting_or<T>(storage: &dyn KeyValueStore, key: &str, default: T) -> T
where
    T: for<'de> Deserialize<'de>,
{
    let Some(json_str) = storage.get_string(key) else {
        return default;
    };
    match serde_json::from_str(&json_str) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, value = %json_str, error = %e, "ignoring malformed persisted setting");
            default
        }
    }
}

/// Attempts to load a setting, returning None if not found or invalid.
pub fn try_load_setting<T>(storage: &dyn KeyValueStore, key: &str) -> Option<T>
where
    T: for<'de> Deserialize<'de>,
{
    let json_str = storage.get_string(key)?;
    serde_json::from_str(&json_str).ok()
}

/// Saves a setting to storage and flushes it.
///
/// # Arguments
/// * `storage` - The key-value store (mutable)
/// * `key` - The storage key for this setting
/// * `value` - The value to serialize and save
pub fn save_setting<T>(storage: &mut dyn KeyValueStore, key: &str, value: &T)
where
    T: Serialize + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(json_str) => {
            storage.set_string(key, json_str);
            storage.flush();
        }
        Err(e) => tracing::warn!(key, error = %e, "failed to encode setting"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::ThemeMode;

    #[test]
    fn test_save_and_load_simple() {
        let mut storage = MemoryStore::new();

        save_setting(&mut storage, "sidebarCollapsed", &true);

        let loaded: bool = load_setting(&storage, "sidebarCollapsed");
        assert!(loaded);
        assert_eq!(storage.get_string("sidebarCollapsed").as_deref(), Some("true"));
    }

    #[test]
    fn test_load_with_default() {
        let storage = MemoryStore::new();

        let loaded: bool = load_setting(&storage, "missing_key");
        assert!(!loaded);

        let mode = load_setting_or(&storage, "themeMode", ThemeMode::Auto);
        assert_eq!(mode, ThemeMode::Auto);
    }

    #[test]
    fn test_malformed_value_falls_back() {
        let storage = MemoryStore::with_entries([
            ("themeMode", "\"sepia\""),
            ("sidebarCollapsed", "yes please"),
        ]);

        assert_eq!(load_setting_or(&storage, "themeMode", ThemeMode::Auto), ThemeMode::Auto);
        assert!(!load_setting_or(&storage, "sidebarCollapsed", false));
    }

    #[test]
    fn test_try_load_setting() {
        let mut storage = MemoryStore::new();

        let result: Option<ThemeMode> = try_load_setting(&storage, "themeMode");
        assert_eq!(result, None);

        save_setting(&mut storage, "themeMode", &ThemeMode::Light);
        let result: Option<ThemeMode> = try_load_setting(&storage, "themeMode");
        assert_eq!(result, Some(ThemeMode::Light));
    }
}
