//! Header panel UI rendering
//!
//! Handles the top bar with the menu toggles and the theme selector.

use eframe::egui;
use rlayout::{LayoutState, ThemeMode};

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User clicked the sidebar (or, on narrow screens, mobile menu) toggle
    MenuToggled,
    /// User picked a theme mode in the selector
    ThemeModeSelected(ThemeMode),
    /// User clicked the quick dark/light switch
    DarkModeToggled(bool),
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Current layout snapshot
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &LayoutState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("☰").on_hover_text("Toggle navigation").clicked() {
            interaction = Some(HeaderInteraction::MenuToggled);
        }

        ui.heading("Dashboard");

        // Push theme controls to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let dark = state.effective_dark_mode();
            let icon = if dark { "🌙" } else { "☀" };
            if ui.button(icon).on_hover_text("Switch dark/light").clicked() {
                interaction = Some(HeaderInteraction::DarkModeToggled(!dark));
            }

            let old_mode = state.theme_mode();
            let mut current_mode = old_mode;
            egui::ComboBox::from_id_salt("theme_mode_selector")
                .selected_text(current_mode.label())
                .show_ui(ui, |ui| {
                    for mode in ThemeMode::ALL {
                        ui.selectable_value(&mut current_mode, mode, mode.label());
                    }
                });

            if old_mode != current_mode {
                interaction = Some(HeaderInteraction::ThemeModeSelected(current_mode));
            }

            ui.label("Theme:");
        });
    });

    interaction
}
