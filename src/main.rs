// src/main.rs
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod file;
mod input;
mod state;
mod ui;
mod workflow;

use crate::api::HttpAnalyticsApi;
use crate::app::AnalyzerApp;
use crate::config::Settings;
use crate::state::AppState;
use crate::workflow::Backend;

fn main() -> Result<()> {
    let settings = Settings::load()?;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!("Using analytics service at {}", settings.base_url);

    // Requests run here; the GUI keeps the main thread
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    let api = HttpAnalyticsApi::new(&settings)?;
    let backend = Backend::new(Arc::new(api), runtime.handle().clone());
    let state = AppState::new(settings, backend);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Smart Analyzer")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Smart Analyzer",
        options,
        Box::new(|cc| Box::new(AnalyzerApp::new(cc, state))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
