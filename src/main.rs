mod action_bar;
mod app;
mod canvas;
mod compositor;
mod export;
mod loader;
mod placement;
mod platform;
mod state;
mod template;
mod theme;
mod ui_controls;

use eframe::egui;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let viewport = egui::ViewportBuilder::default()
        .with_title("Election Compare")
        .with_inner_size([680.0, 740.0])
        .with_min_inner_size([648.0, 700.0]);

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Election Compare",
        options,
        Box::new(|cc| Box::new(app::ElectionCompareApp::new(cc))),
    )
}
