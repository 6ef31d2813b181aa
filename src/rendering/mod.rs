//! Output rendering - from smoothed series to charts.
//!
//! Supports two targets:
//! - Chart mode: PNG/SVG image via plotters (feature `plotters`)
//! - Terminal mode: colored sparklines with first/last/min/max
//!
//! Both consume the same explicit `Figure`.

mod chart;
mod colors;
mod figure;
mod terminal;

pub use chart::{ChartRenderer, ImageFormat};
pub use colors::{Colorizer, SeriesColor};
pub use figure::{Axis, Figure, PlotSeries, Renderer, padded};
pub use terminal::{TerminalRenderer, sparkline};
