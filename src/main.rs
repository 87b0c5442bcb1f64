mod app;
mod charts;
mod cli;
mod color;
mod config;
mod data;
mod error;
mod link;
mod scale;
mod scene;
mod state;
mod tooltip;
mod ui;

use anyhow::Context;
use app::WeatherChartsApp;
use clap::Parser;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let config = args.app_config().context("invalid configuration")?;
    let data = args.data_path(&config);
    log::info!("Starting with data file {}", data.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window)
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Atlanta Weather 2020–2022",
        options,
        Box::new(move |_cc| Ok(Box::new(WeatherChartsApp::new(config, &data)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
