//! Static Chart Renderer
//! Writes the dashboard charts to a PNG file with plotters.
//!
//! Layout:
//! 1. Top half: bubble chart (prevalence vs. income, bubble size = GDP)
//! 2. Bottom half: tile-grid choropleth of obesity prevalence

use crate::charts::plotter::{BubblePoint, ChartPlotter};
use crate::charts::scale::{label_color, ColorScale};
use crate::data::region::{self, GRID_SIZE};
use crate::data::{Record, RegionRecord};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

pub const BUBBLE_TITLE: &str =
    "Obesity Prevalence vs. Median Household Income in 2023 (bubble size = GDP)";
pub const MAP_TITLE: &str = "Obesity Prevalence Rates Across the U.S. (2023)";

const WIDTH: u32 = 1400;
const HEIGHT: u32 = 1400;
const BUBBLE_FILL: RGBColor = RGBColor(99, 110, 250);
const NO_DATA_STROKE: RGBColor = RGBColor(180, 180, 180);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing error: {0}")]
    Drawing(String),
}

fn drawing_error<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> RenderError {
    RenderError::Drawing(e.to_string())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render both charts into one PNG at `path`.
    pub fn export_png(
        path: &Path,
        filtered: &[Record],
        regions: &[RegionRecord],
        size_max: f32,
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let (upper, lower) = root.split_vertically(HEIGHT / 2);
        let points = ChartPlotter::bubble_points(filtered, size_max);
        Self::draw_bubble_chart(&upper, &points)?;
        Self::draw_tile_map(&lower, regions)?;

        root.present().map_err(drawing_error)?;
        log::info!("Exported charts to {}", path.display());
        Ok(())
    }

    /// Padded axis extent; a unit range when there is nothing to show.
    fn axis_range(values: impl Iterator<Item = f64>, pad_ratio: f64) -> (f64, f64) {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() {
            return (0.0, 1.0);
        }
        let pad = ((max - min) * pad_ratio).max(1.0);
        (min - pad, max + pad)
    }

    fn draw_bubble_chart<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        points: &[BubblePoint],
    ) -> Result<(), RenderError> {
        let (x0, x1) = Self::axis_range(points.iter().map(|p| p.prevalence), 0.08);
        let (y0, y1) = Self::axis_range(points.iter().map(|p| p.income), 0.08);

        let mut chart = ChartBuilder::on(area)
            .caption(BUBBLE_TITLE, ("sans-serif", 24))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(90)
            .build_cartesian_2d(x0..x1, y0..y1)
            .map_err(drawing_error)?;

        chart
            .configure_mesh()
            .x_desc("Obesity Prevalence (%)")
            .y_desc("Median Household Income ($)")
            .y_label_formatter(&|v| format!("{:.0}", v))
            .draw()
            .map_err(drawing_error)?;

        chart
            .draw_series(points.iter().map(|p| {
                Circle::new(
                    (p.prevalence, p.income),
                    (p.diameter / 2.0).round() as i32,
                    BUBBLE_FILL.mix(0.6).filled(),
                )
            }))
            .map_err(drawing_error)?;

        chart
            .draw_series(points.iter().map(|p| {
                let label = region::lookup(&p.state)
                    .map(|r| r.code.to_string())
                    .unwrap_or_else(|| p.state.clone());
                Text::new(
                    label,
                    (p.prevalence, p.income),
                    ("sans-serif", 12)
                        .into_font()
                        .color(&BLACK)
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                )
            }))
            .map_err(drawing_error)?;

        Ok(())
    }

    fn draw_tile_map<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        regions: &[RegionRecord],
    ) -> Result<(), RenderError> {
        let area = area
            .titled(MAP_TITLE, ("sans-serif", 24))
            .map_err(drawing_error)?;
        let Some(scale) = ColorScale::for_regions(regions) else {
            return Ok(());
        };

        let (width, height) = area.dim_in_pixel();
        let (cols, rows) = (GRID_SIZE.0 as i32, GRID_SIZE.1 as i32);
        // One extra column is left for the color bar
        let tile = ((width as i32 - 40) / (cols + 1)).min((height as i32 - 20) / rows);
        let left = (width as i32 - tile * (cols + 1)) / 2;
        let top = 10;
        let gap = 3;

        let by_code: HashMap<&str, &RegionRecord> =
            regions.iter().map(|r| (r.code(), r)).collect();

        for r in region::REGIONS.iter() {
            let x = left + r.col as i32 * tile;
            let y = top + r.row as i32 * tile;
            let corners = [(x, y), (x + tile - gap, y + tile - gap)];
            let center = (x + (tile - gap) / 2, y + (tile - gap) / 2);

            let label_fill = match by_code.get(r.code) {
                Some(rr) => {
                    let fill = scale.rgb(rr.record.prevalence);
                    area.draw(&Rectangle::new(corners, fill.filled()))
                        .map_err(drawing_error)?;
                    label_color(fill)
                }
                None => {
                    area.draw(&Rectangle::new(corners, NO_DATA_STROKE.stroke_width(1)))
                        .map_err(drawing_error)?;
                    NO_DATA_STROKE
                }
            };

            area.draw(&Text::new(
                r.code,
                center,
                ("sans-serif", (tile / 3).max(10))
                    .into_font()
                    .color(&label_fill)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            ))
            .map_err(drawing_error)?;
        }

        // Color bar
        let bar_x = left + cols * tile + tile / 3;
        let bar_h = rows * tile * 4 / 5;
        let steps = 60;
        for i in 0..steps {
            let t = 1.0 - i as f64 / (steps - 1) as f64;
            let value = scale.min + t * (scale.max - scale.min);
            let y = top + bar_h * i / steps;
            area.draw(&Rectangle::new(
                [(bar_x, y), (bar_x + tile / 3, y + bar_h / steps + 1)],
                scale.rgb(Some(value)).filled(),
            ))
            .map_err(drawing_error)?;
        }

        let label_font = ("sans-serif", 14).into_font().color(&BLACK);
        area.draw(&Text::new(
            format!("{:.1}%", scale.max),
            (bar_x + tile / 3 + 6, top),
            label_font.clone(),
        ))
        .map_err(drawing_error)?;
        area.draw(&Text::new(
            format!("{:.1}%", scale.min),
            (bar_x + tile / 3 + 6, top + bar_h - 14),
            label_font,
        ))
        .map_err(drawing_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_range_pads() {
        let (lo, hi) = StaticChartRenderer::axis_range(vec![20.0, 40.0].into_iter(), 0.1);
        assert_eq!((lo, hi), (18.0, 42.0));
    }

    #[test]
    fn test_axis_range_single_value() {
        let (lo, hi) = StaticChartRenderer::axis_range(std::iter::once(30.0), 0.1);
        assert_eq!((lo, hi), (29.0, 31.0));
    }

    #[test]
    fn test_axis_range_empty() {
        assert_eq!(
            StaticChartRenderer::axis_range(std::iter::empty(), 0.1),
            (0.0, 1.0)
        );
    }
}
