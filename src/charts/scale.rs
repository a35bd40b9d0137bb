//! Color scale for the choropleth (Viridis, low = dark purple, high = yellow).

use crate::data::RegionRecord;
use egui::Color32;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use plotters::style::RGBColor;

/// Color of tiles without a prevalence value.
pub const NO_DATA_COLOR: RGBColor = RGBColor(200, 200, 200);

/// Linear mapping of prevalence onto Viridis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Scale spanning the prevalence values on the map, if any.
    pub fn for_regions(regions: &[RegionRecord]) -> Option<Self> {
        let mut values = regions.iter().filter_map(|r| r.record.prevalence);
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// Position of `value` in [0, 1].
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max > self.min {
            ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
        } else {
            0.5
        }
    }

    pub fn rgb(&self, value: Option<f64>) -> RGBColor {
        match value {
            Some(v) => ViridisRGB.get_color(self.normalize(v) as f32),
            None => NO_DATA_COLOR,
        }
    }

    pub fn color32(&self, value: Option<f64>) -> Color32 {
        to_color32(self.rgb(value))
    }
}

pub fn to_color32(color: RGBColor) -> Color32 {
    let RGBColor(r, g, b) = color;
    Color32::from_rgb(r, g, b)
}

/// Readable label color on top of a tile.
pub fn label_color(background: RGBColor) -> RGBColor {
    let RGBColor(r, g, b) = background;
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    if luma > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}
