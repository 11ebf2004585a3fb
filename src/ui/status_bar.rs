//! Status bar UI rendering
//!
//! Shows the active theme mode, the effective appearance and the last
//! document-root marker.

use eframe::egui;
use egui::RichText;
use rlayout::{LayoutState, RootMarker};

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Current layout snapshot
/// * `root_marker` - Last marker emitted by the legacy dark-mode path
pub fn render_status_bar(ui: &mut egui::Ui, state: &LayoutState, root_marker: Option<RootMarker>) {
    ui.horizontal(|ui| {
        let appearance = if state.effective_dark_mode() { "dark" } else { "light" };
        ui.label(RichText::new(format!("Theme: {} ({})", state.theme_mode(), appearance)).strong());
        ui.label(RichText::new("|").strong());
        ui.label(format!(
            "Sidebar: {}",
            if state.is_sidebar_collapsed() { "collapsed" } else { "expanded" }
        ));

        if let Some(marker) = root_marker {
            ui.label(RichText::new("|").strong());
            ui.label(format!("Root class: {}", marker.as_class()));
        }
    });
}
