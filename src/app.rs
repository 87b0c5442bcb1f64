use std::path::Path;

use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WeatherChartsApp {
    pub state: AppState,
}

impl WeatherChartsApp {
    /// Build the app and try loading `data` straight away.
    pub fn new(config: AppConfig, data: &Path) -> Self {
        let mut state = AppState::new(config);
        state.load(data);
        Self { state }
    }
}

impl eframe::App for WeatherChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + axis dropdown ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: charts ----
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::WHITE))
            .show(ctx, |ui| {
                dashboard::dashboard(ui, &mut self.state);
            });
    }
}
