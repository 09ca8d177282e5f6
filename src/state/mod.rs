// src/state/mod.rs
use eframe::egui;

use crate::config::AppConfig;
use crate::net::upload::{UploadController, UploadOutcome};
use crate::ui::map_view::MapViewState;

pub mod store;

use store::DashboardStore;

/// Core application state. The store is the only shared-data slot; the
/// upload controller is the only component that produces writes to it.
pub struct AppState {
    pub config: AppConfig,
    pub store: DashboardStore,
    pub upload: UploadController,
    pub map: MapViewState,
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> Self {
        let upload = UploadController::new(&config.service);
        let map = MapViewState::new(ctx, &config.map);
        Self {
            config,
            store: DashboardStore::default(),
            upload,
            map,
            error_message: None,
        }
    }

    /// Fold one settled upload into the shared state. Failures surface as
    /// a modal message plus a log entry and leave the store untouched.
    pub fn apply_outcome(&mut self, ctx: &egui::Context, outcome: UploadOutcome) {
        match outcome {
            UploadOutcome::Success { record, change_map } => {
                self.map.set_overlay(ctx, change_map);
                self.store.replace(record);
            }
            failure => {
                if let Some(alert) = failure.alert_text() {
                    log::error!("{alert}");
                    self.error_message = Some(alert);
                }
            }
        }
    }
}
