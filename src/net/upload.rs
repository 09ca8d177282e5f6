// src/net/upload.rs
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use eframe::egui;
use reqwest::blocking::{multipart, Client};
use reqwest::Url;
use thiserror::Error;

use crate::config::ServiceConfig;
use crate::net::response::{ClaimRecord, ServiceResponse};

/// Decoded change-map raster, ready for texture upload on the UI thread.
#[derive(Debug, Clone)]
pub struct ChangeMapImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Terminal result of one upload round trip.
#[derive(Debug)]
pub enum UploadOutcome {
    Success {
        record: ClaimRecord,
        change_map: Option<ChangeMapImage>,
    },
    /// The service answered with an explicit `{ "error": ... }` body.
    ApplicationError(String),
    /// No structured response was obtained: connection, local file read or
    /// body parse failure.
    TransportError(String),
}

impl UploadOutcome {
    /// User-facing alert for a failed round trip. Success yields nothing.
    pub fn alert_text(&self) -> Option<String> {
        match self {
            UploadOutcome::Success { .. } => None,
            UploadOutcome::ApplicationError(message) => {
                Some(format!("Backend error: {message}"))
            }
            UploadOutcome::TransportError(message) => {
                Some(format!("Network error processing file: {message}"))
            }
        }
    }
}

#[derive(Debug, Error)]
enum UploadError {
    #[error("failed to read {path}: {source}")]
    File {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unreadable response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One message from a worker thread back to the shell.
#[derive(Debug)]
struct UploadMessage {
    token: u64,
    outcome: UploadOutcome,
}

/// Owns the round trip to the analysis service.
///
/// Each submission runs on its own short-lived worker thread and reports
/// back over a channel tagged with the request generation. Overlapping
/// submissions are allowed; [`UploadController::poll`] only ever yields the
/// outcome of the latest issued request, so resolution order follows issue
/// order rather than response arrival.
pub struct UploadController {
    client: Client,
    endpoint: Url,
    tx: Sender<UploadMessage>,
    rx: Receiver<UploadMessage>,
    generation: u64,
    in_flight: bool,
}

impl UploadController {
    pub fn new(config: &ServiceConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            tx,
            rx,
            generation: 0,
            in_flight: false,
        }
    }

    /// Kick off one upload. No selected file is a no-op, not an error.
    pub fn submit(&mut self, file: Option<PathBuf>, ctx: &egui::Context) {
        let Some(path) = file else { return };

        self.generation += 1;
        self.in_flight = true;
        let token = self.generation;
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let tx = self.tx.clone();
        let ctx = ctx.clone();

        log::info!("uploading {} (request #{token})", path.display());
        thread::spawn(move || {
            let outcome = run_round_trip(&client, &endpoint, &path);
            if tx.send(UploadMessage { token, outcome }).is_ok() {
                ctx.request_repaint();
            }
        });
    }

    /// Drain settled uploads, keeping only outcomes of the latest issued
    /// request. Responses from an overtaken upload are discarded.
    pub fn poll(&mut self) -> Vec<UploadOutcome> {
        let mut fresh = Vec::new();
        while let Ok(message) = self.rx.try_recv() {
            if message.token != self.generation {
                log::info!(
                    "discarding stale response for request #{}",
                    message.token
                );
                continue;
            }
            self.in_flight = false;
            fresh.push(message.outcome);
        }
        fresh
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

fn run_round_trip(client: &Client, endpoint: &Url, path: &Path) -> UploadOutcome {
    let response = match request_analysis(client, endpoint, path) {
        Ok(response) => response,
        Err(err) => return UploadOutcome::TransportError(err.to_string()),
    };

    match response {
        ServiceResponse::Failure(failure) => UploadOutcome::ApplicationError(failure.error),
        ServiceResponse::Analyzed(record) => {
            let record = record.sanitized();
            let change_map = record
                .analysis
                .as_ref()
                .and_then(|analysis| analysis.change_map_url.as_deref())
                .and_then(|raw| fetch_change_map(client, endpoint, raw));
            UploadOutcome::Success { record, change_map }
        }
    }
}

fn request_analysis(
    client: &Client,
    endpoint: &Url,
    path: &Path,
) -> Result<ServiceResponse, UploadError> {
    let bytes = std::fs::read(path).map_err(|source| UploadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "claim.png".to_string());

    let part = multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(image_mime(path))?;
    let form = multipart::Form::new().part("file", part);

    let body = client.post(endpoint.clone()).multipart(form).send()?.text()?;
    Ok(serde_json::from_str(&body)?)
}

/// MIME type declared for the multipart part. The file dialog filters to
/// PNG/JPEG, so anything unrecognized falls back to PNG.
fn image_mime(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "image/png",
    }
}

/// Resolve the change-map URL; relative paths are joined onto the service
/// endpoint.
fn resolve_change_map_url(endpoint: &Url, raw: &str) -> Option<Url> {
    Url::parse(raw).or_else(|_| endpoint.join(raw)).ok()
}

/// A change map that cannot be fetched or decoded degrades to "no overlay"
/// with a warning; it never fails the upload itself.
fn fetch_change_map(client: &Client, endpoint: &Url, raw: &str) -> Option<ChangeMapImage> {
    let Some(url) = resolve_change_map_url(endpoint, raw) else {
        log::warn!("unusable change map url: {raw}");
        return None;
    };
    match download_raster(client, &url) {
        Ok(image) => Some(image),
        Err(err) => {
            log::warn!("failed to fetch change map {url}: {err}");
            None
        }
    }
}

fn download_raster(client: &Client, url: &Url) -> Result<ChangeMapImage, String> {
    let response = client
        .get(url.clone())
        .send()
        .map_err(|err| format!("request error: {err}"))?;
    if !response.status().is_success() {
        return Err(format!("change-map server responded with {}", response.status()));
    }
    let bytes = response
        .bytes()
        .map_err(|err| format!("failed to read change-map response: {err}"))?;
    let rgba = image::load_from_memory(&bytes)
        .map_err(|err| format!("failed to decode change map: {err}"))?
        .into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ChangeMapImage {
        width: width as usize,
        height: height as usize,
        rgba: rgba.into_raw(),
    })
}
