//! Charts module - Chart rendering

mod plotter;
mod renderer;
mod scale;

pub use plotter::{BubblePoint, ChartPlotter};
pub use renderer::{RenderError, StaticChartRenderer};
pub use scale::ColorScale;
