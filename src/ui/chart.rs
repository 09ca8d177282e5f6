// src/ui/chart.rs
use eframe::egui::{self, Color32};

pub const FOREST_COLOR: Color32 = Color32::from_rgb(0x2e, 0x7d, 0x32);
pub const NON_FOREST_COLOR: Color32 = Color32::from_rgb(0xe8, 0xf5, 0xe9);

const BAR_HEIGHT: f32 = 18.0;
const LABEL_WIDTH: f32 = 80.0;

/// One labeled bar of the land-cover chart.
pub struct ChartEntry {
    pub label: &'static str,
    pub value: f64,
    pub color: Color32,
}

/// The complementary Forest / Non-Forest pair fed to the chart. The caller
/// guarantees the values sum to 100; the chart does not re-check.
pub fn land_cover_entries(forest_percent: f64) -> [ChartEntry; 2] {
    [
        ChartEntry {
            label: "Forest",
            value: forest_percent,
            color: FOREST_COLOR,
        },
        ChartEntry {
            label: "Non-Forest",
            value: 100.0 - forest_percent,
            color: NON_FOREST_COLOR,
        },
    ]
}

/// Bar width as a fraction of the full chart width. Out-of-range values
/// render as degenerate or full bars instead of panicking; the label still
/// shows the raw value.
pub fn bar_fraction(value: f64) -> f32 {
    (value / 100.0).clamp(0.0, 1.0) as f32
}

/// Display form of a bar value: one decimal place with a percent suffix.
pub fn bar_label(value: f64) -> String {
    format!("{value:.1}%")
}

/// Render one proportional filled bar per entry, value text inside the bar.
pub fn show(ui: &mut egui::Ui, entries: &[ChartEntry]) {
    for entry in entries {
        ui.horizontal(|ui| {
            ui.add_sized([LABEL_WIDTH, BAR_HEIGHT], egui::Label::new(entry.label));

            let full_width = ui.available_width().max(0.0);
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(full_width, BAR_HEIGHT),
                egui::Sense::hover(),
            );
            let bar_rect = egui::Rect::from_min_size(
                rect.min,
                egui::vec2(full_width * bar_fraction(entry.value), rect.height()),
            );

            let painter = ui.painter();
            painter.rect_filled(bar_rect, egui::CornerRadius::same(2), entry.color);
            painter.text(
                rect.min + egui::vec2(4.0, rect.height() / 2.0),
                egui::Align2::LEFT_CENTER,
                bar_label(entry.value),
                egui::FontId::proportional(12.0),
                label_color(entry.color),
            );
        });
    }
}

fn label_color(background: Color32) -> Color32 {
    let [r, g, b, _] = background.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        Color32::from_rgb(0x1b, 0x5e, 0x20)
    } else {
        Color32::WHITE
    }
}
