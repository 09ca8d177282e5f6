// src/config.rs
use std::env;

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000/process_claim/";

/// Connection settings for the external claim-analysis service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Endpoint receiving the multipart claim upload.
    pub endpoint: Url,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        let raw = env::var("CLAIM_SERVICE_URL").unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());
        let endpoint =
            Url::parse(&raw).with_context(|| format!("invalid claim service url: {raw}"))?;
        Ok(Self { endpoint })
    }
}

/// Fixed geographic setup for the map view. The boundary ring and the
/// overlay bounds describe the same deployment region; neither is ever
/// derived from service responses.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Initial map center as (lon, lat).
    pub center: (f64, f64),
    pub zoom: f64,
    /// Claim boundary ring as (lon, lat) vertices, closed implicitly.
    pub boundary: Vec<(f64, f64)>,
    /// Change-map extent in WGS-84: (west, south, east, north).
    pub overlay_bounds: (f64, f64, f64, f64),
    pub overlay_opacity: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: (79.05, 23.05),
            zoom: 13.0,
            boundary: vec![(79.0, 23.0), (79.1, 23.0), (79.1, 23.1), (79.0, 23.1)],
            overlay_bounds: (79.0, 23.0, 79.1, 23.1),
            overlay_opacity: 0.7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub map: MapConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            service: ServiceConfig::from_env()?,
            map: MapConfig::default(),
        })
    }
}
