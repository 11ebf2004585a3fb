//! Layout Dashboard GUI Application
//!
//! A dashboard shell built on the `rlayout` store using egui:
//! - Header with navigation toggle, theme-mode selector and dark/light switch
//! - Collapsible sidebar, replaced by an overlay menu on narrow windows
//! - Status bar showing the effective theme and the document-root marker
//!
//! Preferences are written through to a JSON store on every change; see
//! `app::StorageConfig` for how its location is chosen.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

mod app;
mod ui;

use app::{StorageConfig, ThemeCoordinator};
use rlayout::{KeyValueStore, MemoryStore, PolledSystemTheme, RootMarker, ThemeLayoutStore};
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point that initializes logging and launches the dashboard.
fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let storage: Box<dyn KeyValueStore> = match StorageConfig::resolve(std::env::args().nth(1)) {
        Ok(config) => config.open(),
        Err(e) => {
            tracing::warn!(error = %e, "falling back to in-memory layout store");
            Box::new(MemoryStore::new())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_title("Layout Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Layout Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, storage)))),
    )
}

/// The dashboard application.
///
/// All layout preferences live in the store; the app only keeps per-frame
/// view state.
struct DashboardApp {
    store: ThemeLayoutStore,
    /// OS theme source fed from egui input each frame
    system: Rc<PolledSystemTheme>,
    /// Last marker emitted by the legacy dark-mode path
    root_marker: Rc<Cell<Option<RootMarker>>>,
    /// Active navigation entry
    selected_nav: usize,
}

impl DashboardApp {
    /// Creates the dashboard with preferences loaded from `storage`.
    fn new(cc: &eframe::CreationContext, storage: Box<dyn KeyValueStore>) -> Self {
        let system = Rc::new(PolledSystemTheme::new(ThemeCoordinator::os_prefers_dark(&cc.egui_ctx)));
        let store = ThemeLayoutStore::new(storage, system.clone());

        let root_marker = Rc::new(Cell::new(None));
        let sink = Rc::clone(&root_marker);
        store.subscribe_root_marker(move |marker: &RootMarker| sink.set(Some(*marker)));

        // Repaint whenever the store changes outside of an input event (OS theme flips).
        let ctx = cc.egui_ctx.clone();
        store.subscribe(move |_| ctx.request_repaint());

        Self {
            store,
            system,
            root_marker,
            selected_nav: 0,
        }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction) {
        match interaction {
            PanelInteraction::ToggleSidebar => self.store.toggle_sidebar(),
            PanelInteraction::ToggleMobileMenu => self.store.toggle_mobile_menu(),
            PanelInteraction::CloseMobileMenu => self.store.set_mobile_menu_open(false),
            PanelInteraction::SetThemeMode(mode) => self.store.set_theme_mode(mode),
            PanelInteraction::SetDarkMode(dark) => self.store.set_dark_mode_legacy(dark),
        }
    }
}

impl eframe::App for DashboardApp {
    /// Main update loop.
    ///
    /// 1. Forward the OS theme to the store
    /// 2. Apply the effective theme
    /// 3. Render all panels
    /// 4. Apply panel interactions to the store
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ThemeCoordinator::sync_system_theme(ctx, &self.system);
        ThemeCoordinator::apply_current_theme(ctx, &self.store);

        let state = self.store.snapshot();
        if let Some(interaction) =
            PanelManager::render_all_panels(ctx, &state, self.root_marker.get(), &mut self.selected_nav)
        {
            self.handle_panel_interaction(interaction);
        }
    }
}
