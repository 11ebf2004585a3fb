//! Application-level modules for the layout dashboard.
//!
//! This module wires the layout store to egui: storage selection at startup,
//! theme application and OS theme polling each frame.

mod storage_config;
mod theme_coordinator;

pub use storage_config::StorageConfig;
pub use theme_coordinator::ThemeCoordinator;
