// src/main.rs
use anyhow::Result;
use eframe::egui;

mod app;
mod config;
mod net;
mod state;
mod ui;

use app::DashboardApp;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("AI-Powered FRA Claim Monitoring"),
        ..Default::default()
    };

    eframe::run_native(
        "FRA Claim Monitoring",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
