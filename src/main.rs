mod aggregate;
mod app;
mod binding;
mod color;
mod config;
mod context;
mod controller;
mod data;
mod state;
mod ui;

use std::sync::Arc;

use anyhow::Context;
use app::LaunchDashApp;
use clap::Parser;
use config::Config;
use context::DashboardContext;
use controller::ViewController;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    // A dataset that fails to load stops the process before any window opens.
    let table = data::loader::load_file(&config.data).context("startup dataset")?;
    let ctx = Arc::new(DashboardContext::new(table));

    if let Some(path) = &config.export_json {
        let mut controller = ViewController::new(ctx);
        controller.mount();
        return controller.export_json(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width, config.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let payload_step = config.payload_step;
    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(ctx, payload_step)))),
    )
    .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
