//! Desktop window (eframe/egui)

mod app;
pub mod icon;
pub mod theme;

pub use app::XDashApp;

use anyhow::Result;
use tracing::info;

use crate::content::LayoutWatcher;
use crate::launcher::Launcher;

pub const WINDOW_TITLE: &str = "XDash - Xbox 360 Content Manager for Xenia Canary";
pub const WINDOW_SIZE: [f32; 2] = [1920.0, 1080.0];

/// Open the main window and block until it is closed
pub fn run(launcher: Launcher, watcher: Option<LayoutWatcher>) -> Result<()> {
    let icon = icon::window_icon(&launcher.paths().window_icon());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(WINDOW_SIZE)
            .with_resizable(false)
            .with_icon(icon),
        centered: true,
        ..Default::default()
    };

    info!("Opening window ({}x{})", WINDOW_SIZE[0], WINDOW_SIZE[1]);

    eframe::run_native(
        "XDash",
        native_options,
        Box::new(|cc| {
            theme::apply_theme(&cc.egui_ctx);
            Ok(Box::new(XDashApp::new(launcher, watcher)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))
}
