//! Chart Plotter Module
//! Draws the interactive bubble chart (egui_plot) and the tile-grid
//! choropleth (egui painter).

use crate::charts::scale::{label_color, to_color32, ColorScale};
use crate::data::region::{self, GRID_SIZE};
use crate::data::{Record, RegionRecord};
use egui::{Align2, Color32, FontId, RichText, Sense, Stroke};
use egui_plot::{Plot, PlotPoints, Points};
use std::collections::HashMap;

pub const BUBBLE_COLOR: Color32 = Color32::from_rgb(99, 110, 250);

/// Diameter for rows whose GDP is missing or not positive.
pub const MIN_BUBBLE_DIAMETER: f32 = 4.0;

const TILE_GAP: f32 = 3.0;
const COLOR_BAR_WIDTH: f32 = 18.0;
const COLOR_BAR_STEPS: usize = 48;

/// One plotted state of the bubble chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BubblePoint {
    pub state: String,
    pub prevalence: f64,
    pub income: f64,
    pub gdp: Option<f64>,
    /// Diameter in pixels.
    pub diameter: f32,
}

/// Draws the dashboard charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Bubble chart points. Bubble area is proportional to GDP, the largest
    /// GDP getting `size_max`. Rows without both axes are skipped.
    pub fn bubble_points(records: &[Record], size_max: f32) -> Vec<BubblePoint> {
        let max_gdp = records
            .iter()
            .filter_map(|r| r.gdp_2023)
            .filter(|g| *g > 0.0)
            .fold(0.0_f64, f64::max);

        records
            .iter()
            .filter_map(|r| {
                let (prevalence, income) = (r.prevalence?, r.median_household_income?);
                let diameter = match r.gdp_2023 {
                    Some(gdp) if gdp > 0.0 && max_gdp > 0.0 => {
                        (size_max * (gdp / max_gdp).sqrt() as f32).max(MIN_BUBBLE_DIAMETER)
                    }
                    _ => MIN_BUBBLE_DIAMETER,
                };
                Some(BubblePoint {
                    state: r.state.clone(),
                    prevalence,
                    income,
                    gdp: r.gdp_2023,
                    diameter,
                })
            })
            .collect()
    }

    /// Draw the prevalence / income bubble chart.
    pub fn draw_bubble_chart(ui: &mut egui::Ui, points: &[BubblePoint], height: f32) {
        let gdp_by_state: HashMap<String, Option<f64>> = points
            .iter()
            .map(|p| (p.state.clone(), p.gdp))
            .collect();

        Plot::new("bubble_chart")
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Obesity Prevalence (%)")
            .y_axis_label("Median Household Income ($)")
            .label_formatter(move |name, value| {
                if name.is_empty() {
                    return String::new();
                }
                let gdp = gdp_by_state
                    .get(name)
                    .copied()
                    .flatten()
                    .map(|g| format!("{:.0}", g))
                    .unwrap_or_else(|| "n/a".to_string());
                format!(
                    "{}\nPrevalence: {:.1}%\nIncome: ${:.0}\nGDP: ${}",
                    name, value.x, value.y, gdp
                )
            })
            .show(ui, |plot_ui| {
                for p in points {
                    plot_ui.points(
                        Points::new(PlotPoints::new(vec![[p.prevalence, p.income]]))
                            .radius(p.diameter / 2.0)
                            .color(BUBBLE_COLOR.gamma_multiply(0.7))
                            .name(&p.state),
                    );
                }
            });
    }

    /// Draw the tile-grid choropleth with a color bar on its right.
    pub fn draw_choropleth(ui: &mut egui::Ui, regions: &[RegionRecord], max_width: f32) {
        let Some(scale) = ColorScale::for_regions(regions) else {
            ui.label(RichText::new("No prevalence data to map").color(Color32::GRAY));
            return;
        };

        let (cols, rows) = (GRID_SIZE.0 as f32, GRID_SIZE.1 as f32);
        let tile = ((max_width - COLOR_BAR_WIDTH - 60.0) / cols).clamp(28.0, 64.0);
        let by_code: HashMap<&str, &RegionRecord> =
            regions.iter().map(|r| (r.code(), r)).collect();

        ui.horizontal(|ui| {
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(tile * cols, tile * rows), Sense::hover());
            let painter = ui.painter_at(rect);
            let font = FontId::proportional(tile * 0.3);

            for region in region::REGIONS.iter() {
                let min = rect.min + egui::vec2(region.col as f32 * tile, region.row as f32 * tile);
                let tile_rect =
                    egui::Rect::from_min_size(min, egui::vec2(tile - TILE_GAP, tile - TILE_GAP));

                match by_code.get(region.code) {
                    Some(rr) => {
                        let fill = scale.rgb(rr.record.prevalence);
                        painter.rect_filled(tile_rect, 4.0, to_color32(fill));
                        painter.text(
                            tile_rect.center(),
                            Align2::CENTER_CENTER,
                            region.code,
                            font.clone(),
                            to_color32(label_color(fill)),
                        );
                        ui.interact(tile_rect, ui.id().with(region.code), Sense::hover())
                            .on_hover_text(Self::region_tooltip(rr));
                    }
                    None => {
                        painter.rect_stroke(tile_rect, 4.0, Stroke::new(1.0, Color32::GRAY));
                        painter.text(
                            tile_rect.center(),
                            Align2::CENTER_CENTER,
                            region.code,
                            font.clone(),
                            Color32::GRAY,
                        );
                    }
                }
            }

            ui.add_space(12.0);
            Self::draw_color_bar(ui, &scale, tile * rows * 0.8);
        });
    }

    fn region_tooltip(rr: &RegionRecord) -> String {
        let fmt = |v: Option<f64>, decimals: usize| {
            v.map(|x| format!("{:.*}", decimals, x))
                .unwrap_or_else(|| "n/a".to_string())
        };
        format!(
            "{} ({})\nObesity Prevalence (%): {}\nMedian Household Income (USD): {}\nGDP (USD): {}",
            rr.region.name,
            rr.code(),
            fmt(rr.record.prevalence, 1),
            fmt(rr.record.median_household_income, 0),
            fmt(rr.record.gdp_2023, 0)
        )
    }

    /// Vertical gradient, highest value on top.
    fn draw_color_bar(ui: &mut egui::Ui, scale: &ColorScale, height: f32) {
        ui.vertical(|ui| {
            ui.label(RichText::new(format!("{:.1}%", scale.max)).size(11.0));
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(COLOR_BAR_WIDTH, height), Sense::hover());
            let painter = ui.painter_at(rect);
            let step_h = height / COLOR_BAR_STEPS as f32;

            for i in 0..COLOR_BAR_STEPS {
                let t = 1.0 - i as f64 / (COLOR_BAR_STEPS - 1) as f64;
                let value = scale.min + t * (scale.max - scale.min);
                let band = egui::Rect::from_min_size(
                    rect.min + egui::vec2(0.0, i as f32 * step_h),
                    egui::vec2(COLOR_BAR_WIDTH, step_h + 0.5),
                );
                painter.rect_filled(band, 0.0, scale.color32(Some(value)));
            }
            ui.label(RichText::new(format!("{:.1}%", scale.min)).size(11.0));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubble_area_tracks_gdp() {
        let records = vec![
            Record::new("Alabama", Some(39.0), Some(52000.0), Some(250000.0)),
            Record::new("Vermont", Some(28.0), Some(67000.0), Some(62500.0)),
        ];

        let points = ChartPlotter::bubble_points(&records, 60.0);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].diameter, 60.0);
        assert_eq!(points[1].diameter, 30.0);
    }

    #[test]
    fn test_rows_without_axes_are_skipped() {
        let records = vec![
            Record::new("Alabama", None, Some(52000.0), Some(250000.0)),
            Record::new("Guam", Some(30.0), None, None),
            Record::new("Vermont", Some(28.0), Some(67000.0), None),
        ];

        let points = ChartPlotter::bubble_points(&records, 60.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].state, "Vermont");
        assert_eq!(points[0].diameter, MIN_BUBBLE_DIAMETER);
    }

    #[test]
    fn test_empty_table() {
        assert!(ChartPlotter::bubble_points(&[], 60.0).is_empty());
    }
}
