// src/ui/claim_panel.rs
use eframe::egui;
use rfd::FileDialog;

use crate::state::AppState;
use crate::ui::chart;

/// Left panel: upload controls, extracted claim details and the dashboard
/// counters with the land-cover chart.
pub fn show(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("1. Upload Claim Document");
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        if ui.button("Select Image...").clicked() {
            let file = FileDialog::new()
                .add_filter("Claim images", &["png", "jpg", "jpeg"])
                .set_title("Select Claim Document")
                .pick_file();
            state.upload.submit(file, ui.ctx());
        }
        if state.upload.is_in_flight() {
            ui.spinner();
            ui.label("Analyzing claim...");
        }
    });

    let (record, stats) = state.store.current();

    if let Some(record) = record {
        ui.add_space(8.0);
        ui.group(|ui| {
            ui.heading("Extracted Details");
            egui::Grid::new("claim_details")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("Name:");
                    ui.label(&record.name);
                    ui.end_row();

                    ui.strong("Village:");
                    ui.label(&record.village);
                    ui.end_row();

                    ui.strong("Area:");
                    ui.label(&record.area);
                    ui.end_row();

                    ui.strong("Anomaly?:");
                    match &record.analysis {
                        Some(analysis) if analysis.flagged_as_anomaly => ui.label("Yes 🚩"),
                        Some(_) => ui.label("No ✅"),
                        None => ui.label("n/a"),
                    };
                    ui.end_row();
                });
        });
    }

    ui.add_space(8.0);
    ui.separator();
    ui.heading("Dashboard");
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        stat_box(ui, stats.claims_processed, "Claims Processed");
        stat_box(ui, stats.anomalies_flagged, "Anomalies Flagged");
    });

    ui.add_space(8.0);
    ui.heading("Land Cover Analysis");
    chart::show(ui, &chart::land_cover_entries(stats.forest_percent));
}

fn stat_box(ui: &mut egui::Ui, value: u32, label: &str) {
    ui.group(|ui| {
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(value.to_string()).size(28.0).strong());
            ui.label(label);
        });
    });
}
