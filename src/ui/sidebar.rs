//! Sidebar navigation rendering

use eframe::egui;

/// Width of the expanded sidebar
pub const EXPANDED_WIDTH: f32 = 200.0;
/// Width of the icon-only sidebar
pub const COLLAPSED_WIDTH: f32 = 48.0;

const NAV_ITEMS: [(&str, &str); 4] = [
    ("📊", "Overview"),
    ("👤", "Users"),
    ("📁", "Files"),
    ("⚙", "Settings"),
];

/// Renders the navigation list.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `collapsed` - Show icons only
/// * `selected` - Index of the active entry, updated on click
///
/// # Returns
/// * `bool` - True when an entry was clicked
pub fn render_sidebar(ui: &mut egui::Ui, collapsed: bool, selected: &mut usize) -> bool {
    let mut clicked = false;

    ui.vertical(|ui| {
        for (i, (icon, label)) in NAV_ITEMS.iter().enumerate() {
            let text = if collapsed {
                icon.to_string()
            } else {
                format!("{icon}  {label}")
            };
            let response = ui.selectable_label(*selected == i, text);
            let response = if collapsed { response.on_hover_text(*label) } else { response };
            if response.clicked() {
                *selected = i;
                clicked = true;
            }
        }
    });

    clicked
}

/// Name of the navigation entry at `index`.
pub fn item_label(index: usize) -> &'static str {
    NAV_ITEMS.get(index).map(|(_, label)| *label).unwrap_or("")
}
