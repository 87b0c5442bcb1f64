use eframe::egui::{self, Color32, RichText, Ui};

use crate::charts::scatter::AxisChoice;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        // ---- Scatterplot y-axis dropdown ----
        let mut choice = state.axis;
        egui::ComboBox::from_id_salt("scatter_axis")
            .selected_text(choice.label())
            .show_ui(ui, |ui: &mut Ui| {
                for option in AxisChoice::ALL {
                    ui.selectable_value(&mut choice, option, option.label());
                }
            });
        state.set_axis(choice);

        ui.separator();

        if let (Some(ctl), Some(path)) = (&state.controller, &state.data_path) {
            let mut text = format!("{} days from {}", ctl.dataset().len(), path.display());
            if let Some(selection) = ctl.selection() {
                text.push_str(&format!(", {} brushed", selection.days.len()));
            }
            ui.label(text);
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open weather data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
