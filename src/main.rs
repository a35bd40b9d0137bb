//! State Obesity Dashboard - Obesity, Income & GDP Across U.S. States
//!
//! Usage: obesity-dashboard [DATA_DIR | CONFIG.json]

use eframe::egui;
use obesity_dashboard::config::DashboardConfig;
use obesity_dashboard::gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::from_args(std::env::args().skip(1))?;
    log::info!("Reading sources from {}", config.data_dir.display());

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("State Obesity Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "State Obesity Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {e}"))
}
