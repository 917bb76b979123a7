//! Sunspot Dashboard - Sunspot CSV Analysis & Four-Panel Chart Viewer
//!
//! Loads the yearly sunspot dataset and shows time series, distribution,
//! boxplot and trend charts in one window.

use anyhow::Context;
use eframe::egui;
use std::path::Path;
use sunspot_dashboard::config::{DashboardSettings, SETTINGS_FILE};
use sunspot_dashboard::gui::SunspotDashboardApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = DashboardSettings::resolve(Path::new(SETTINGS_FILE))
        .context("Failed to resolve dashboard settings")?;
    log::info!("Data source: {}", settings.csv_path);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 1000.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Sunspot Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Sunspot Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SunspotDashboardApp::new(settings)))),
    )
    .map_err(|e| anyhow::anyhow!("Window failed: {e}"))
}
