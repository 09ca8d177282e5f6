// src/ui/map_view.rs
use eframe::egui::{self, Color32, Rect, Stroke, TextureHandle, Ui};
use walkers::sources::OpenStreetMap;
use walkers::{lon_lat, HttpTiles, Map, MapMemory, Plugin, Position, Projector};

use crate::config::MapConfig;
use crate::net::upload::ChangeMapImage;

/// Persistent map widget state (survives between frames).
pub struct MapViewState {
    tiles: HttpTiles,
    memory: MapMemory,
    center: Position,
    overlay: Option<TextureHandle>,
}

impl MapViewState {
    pub fn new(ctx: &egui::Context, config: &MapConfig) -> Self {
        let mut memory = MapMemory::default();
        if memory.set_zoom(config.zoom).is_err() {
            log::warn!("configured zoom {} rejected by the map widget", config.zoom);
        }
        Self {
            tiles: HttpTiles::new(OpenStreetMap, ctx.clone()),
            memory,
            center: lon_lat(config.center.0, config.center.1),
            overlay: None,
        }
    }

    /// Swap in the change-map raster of the latest successful analysis, or
    /// drop the previous one when the new claim has none.
    pub fn set_overlay(&mut self, ctx: &egui::Context, image: Option<ChangeMapImage>) {
        self.overlay = image.map(|image| {
            let pixels = egui::ColorImage::from_rgba_unmultiplied(
                [image.width, image.height],
                &image.rgba,
            );
            ctx.load_texture("change_map_overlay", pixels, egui::TextureOptions::LINEAR)
        });
    }
}

/// Fixed claim-boundary ring drawn on top of the base tiles.
struct BoundaryPolygon<'a> {
    ring: &'a [(f64, f64)],
    stroke: Stroke,
}

impl Plugin for BoundaryPolygon<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        _response: &egui::Response,
        projector: &Projector,
    ) {
        let points: Vec<egui::Pos2> = self
            .ring
            .iter()
            .map(|&(lon, lat)| {
                let projected = projector.project(lon_lat(lon, lat));
                egui::pos2(projected.x, projected.y)
            })
            .collect();
        ui.painter().add(egui::Shape::closed_line(points, self.stroke));
    }
}

/// Change-map raster stretched over its fixed geographic bounds.
struct ChangeMapOverlay<'a> {
    texture: &'a TextureHandle,
    /// WGS-84 extent: (west, south, east, north).
    bounds: (f64, f64, f64, f64),
    opacity: f32,
}

impl Plugin for ChangeMapOverlay<'_> {
    fn run(
        self: Box<Self>,
        ui: &mut Ui,
        _response: &egui::Response,
        projector: &Projector,
    ) {
        let (west, south, east, north) = self.bounds;
        let nw = projector.project(lon_lat(west, north));
        let se = projector.project(lon_lat(east, south));
        let screen_rect =
            Rect::from_min_max(egui::pos2(nw.x, nw.y), egui::pos2(se.x, se.y));

        let tint = Color32::from_white_alpha((self.opacity * 255.0) as u8);
        ui.painter().image(
            self.texture.id(),
            screen_rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            tint,
        );
    }
}

/// Render the base tiles, the boundary polygon and, when the current claim
/// carries a change map, the raster overlay. The polygon is independent of
/// the overlay condition.
pub fn show(ui: &mut Ui, state: &mut MapViewState, config: &MapConfig, show_overlay: bool) {
    let mut map = Map::new(Some(&mut state.tiles), &mut state.memory, state.center)
        .with_plugin(BoundaryPolygon {
            ring: &config.boundary,
            stroke: Stroke::new(3.0, Color32::BLUE),
        });

    if show_overlay {
        if let Some(texture) = state.overlay.as_ref() {
            map = map.with_plugin(ChangeMapOverlay {
                texture,
                bounds: config.overlay_bounds,
                opacity: config.overlay_opacity,
            });
        }
    }

    ui.add(map);
}
