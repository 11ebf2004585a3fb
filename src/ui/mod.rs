//! UI panel rendering for the layout dashboard.

pub mod header;
pub mod panel_manager;
pub mod sidebar;
pub mod status_bar;
