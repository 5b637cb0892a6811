mod app;
mod ui;

use anyhow::Result;
use app::DashboardApp;
use clap::Parser;
use eframe::egui;
use nfhs_dashboard::config::{Cli, DashboardConfig};
use nfhs_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = DashboardConfig::resolve(&cli)?;

    let mut state = AppState::new(config);
    let data_path = state.config.data_path.clone();
    if let Err(e) = state.open(&data_path) {
        // The window still opens so another file can be picked via File → Open.
        log::warn!("starting without data: {e}");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NFHS India Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
