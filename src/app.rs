// src/app.rs
use eframe::egui;

use crate::config::AppConfig;
use crate::net::response::ClaimRecord;
use crate::state::AppState;
use crate::ui;

pub struct DashboardApp {
    state: AppState,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        Self {
            state: AppState::new(&cc.egui_ctx, config),
        }
    }
}

/// The raster overlay is shown iff the stored claim carries a change map.
fn overlay_visible(record: Option<&ClaimRecord>) -> bool {
    record
        .and_then(|record| record.analysis.as_ref())
        .is_some_and(|analysis| analysis.change_map_url.is_some())
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for outcome in self.state.upload.poll() {
            self.state.apply_outcome(ctx, outcome);
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.heading("AI-Powered FRA Claim Monitoring");
        });

        egui::SidePanel::left("claim_panel")
            .resizable(true)
            .default_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui::claim_panel::show(ui, &mut self.state);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let show_overlay = {
                let (record, _) = self.state.store.current();
                overlay_visible(record)
            };
            ui::map_view::show(ui, &mut self.state.map, &self.state.config.map, show_overlay);
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone();
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::response::ClaimAnalysis;

    fn record(change_map_url: Option<&str>) -> ClaimRecord {
        ClaimRecord {
            name: String::new(),
            village: String::new(),
            area: String::new(),
            analysis: Some(ClaimAnalysis {
                flagged_as_anomaly: false,
                forest_cover_percent: 50.0,
                change_map_url: change_map_url.map(str::to_string),
            }),
        }
    }

    #[test]
    fn overlay_requires_a_change_map_url() {
        assert!(overlay_visible(Some(&record(Some("http://x/a.png")))));
        assert!(!overlay_visible(Some(&record(None))));
    }

    #[test]
    fn overlay_hidden_without_record_or_analysis() {
        assert!(!overlay_visible(None));

        let bare = ClaimRecord {
            name: String::new(),
            village: String::new(),
            area: String::new(),
            analysis: None,
        };
        assert!(!overlay_visible(Some(&bare)));
    }
}
