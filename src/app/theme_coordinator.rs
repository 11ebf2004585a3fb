//! Theme application and OS theme polling.
//!
//! egui reports the OS theme as part of each frame's input; the coordinator
//! forwards it to the store's OS preference source and applies the store's
//! effective dark mode to the egui context.

use rlayout::{PolledSystemTheme, ThemeLayoutStore};

/// Coordinates the layout store with egui's theming.
pub struct ThemeCoordinator;

impl ThemeCoordinator {
    /// Reads the OS theme reported by egui, if any.
    pub fn os_prefers_dark(ctx: &egui::Context) -> bool {
        matches!(ctx.system_theme(), Some(egui::Theme::Dark))
    }

    /// Pushes the current OS theme into `system`.
    ///
    /// Called every frame; watchers only fire when the value changes.
    pub fn sync_system_theme(ctx: &egui::Context, system: &PolledSystemTheme) {
        if let Some(theme) = ctx.system_theme() {
            system.set_dark_preferred(theme == egui::Theme::Dark);
        }
    }

    /// Applies the store's effective dark mode to the egui context.
    pub fn apply_current_theme(ctx: &egui::Context, store: &ThemeLayoutStore) {
        let wanted = if store.effective_dark_mode() {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        };
        if ctx.theme() != wanted {
            ctx.set_theme(wanted);
        }
    }
}
