//! Panel orchestration and layout management.
//!
//! Coordinates the header, sidebar, status bar and content panels. On narrow
//! windows the sidebar is replaced by an overlay menu driven by the
//! mobile-menu flag.

use eframe::egui;
use rlayout::{LayoutState, RootMarker, ThemeMode};

use crate::ui::{header, sidebar, status_bar};

/// Windows narrower than this use the mobile layout.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Result of panel interactions that the application applies to the store.
pub enum PanelInteraction {
    ToggleSidebar,
    ToggleMobileMenu,
    CloseMobileMenu,
    SetThemeMode(ThemeMode),
    SetDarkMode(bool),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// # Arguments
    /// * `ctx` - The egui context
    /// * `state` - Layout snapshot for this frame
    /// * `root_marker` - Last document-root marker, for the status bar
    /// * `selected_nav` - Active navigation entry
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &LayoutState,
        root_marker: Option<RootMarker>,
        selected_nav: &mut usize,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;
        let mobile = ctx.available_rect().width() < MOBILE_BREAKPOINT;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::MenuToggled if mobile => PanelInteraction::ToggleMobileMenu,
                    header::HeaderInteraction::MenuToggled => PanelInteraction::ToggleSidebar,
                    header::HeaderInteraction::ThemeModeSelected(mode) => PanelInteraction::SetThemeMode(mode),
                    header::HeaderInteraction::DarkModeToggled(dark) => PanelInteraction::SetDarkMode(dark),
                });
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state, root_marker);
        });

        if mobile {
            if state.mobile_menu_open() {
                egui::SidePanel::left("mobile_menu")
                    .resizable(false)
                    .exact_width(sidebar::EXPANDED_WIDTH)
                    .show(ctx, |ui| {
                        if sidebar::render_sidebar(ui, false, selected_nav) {
                            interaction = Some(PanelInteraction::CloseMobileMenu);
                        }
                    });
            }
        } else {
            let collapsed = state.is_sidebar_collapsed();
            let width = if collapsed { sidebar::COLLAPSED_WIDTH } else { sidebar::EXPANDED_WIDTH };
            egui::SidePanel::left("sidebar")
                .resizable(false)
                .exact_width(width)
                .show(ctx, |ui| {
                    sidebar::render_sidebar(ui, collapsed, selected_nav);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(sidebar::item_label(*selected_nav));
            ui.separator();
            ui.label(format!("Theme mode: {}", state.theme_mode().label()));
            ui.label(format!("Dark mode in effect: {}", state.effective_dark_mode()));
        });

        interaction
    }
}
