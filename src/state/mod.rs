//! Layout state types.
//!
//! - Theme mode (user preference)
//! - Layout state (observable snapshot)
//! - Root marker (document-root class side channel)

mod theme_mode;
mod layout_state;
mod root_marker;

pub use theme_mode::ThemeMode;
pub use layout_state::LayoutState;
pub use root_marker::RootMarker;
