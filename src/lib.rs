pub mod traits;
pub mod observers;
pub mod state;
pub mod storage;
pub mod system_theme;
pub mod store;

// Export collaborator traits
pub use traits::{KeyValueStore, SystemThemeSource, WatchHandle};

// Export state types
pub use state::{LayoutState, RootMarker, ThemeMode};

// Export storage backends
pub use storage::{FileStore, MemoryStore, SharedMemoryStore, StorageError};

// Export OS preference sources
pub use system_theme::{HeadlessSystemTheme, PolledSystemTheme};

// Export observer handles
pub use observers::ObserverId;

// Export the store
pub use store::{ThemeLayoutStore, MOBILE_MENU_KEY, SIDEBAR_COLLAPSED_KEY, THEME_MODE_KEY};
