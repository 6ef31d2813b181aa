//! Explicit chart description handed to a `Renderer`.
//!
//! There is no ambient figure state: whoever wants a chart builds a
//! `Figure`, fills it with `PlotSeries`, and passes it by reference.

use anyhow::Result;

use crate::types::{Extent, Series, SmoothedSeries};

use super::colors::SeriesColor;

/// Which y-axis a series is drawn against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Primary,
    /// Right-hand axis, used for epsilon in [0, 1].
    Secondary,
}

/// One line on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub color: SeriesColor,
    pub line_width: u32,
    pub axis: Axis,
    pub points: Vec<(f64, f64)>,
}

impl PlotSeries {
    pub fn smoothed(series: &SmoothedSeries, color: SeriesColor, line_width: u32) -> Self {
        Self {
            label: series.legend_label(),
            color,
            line_width,
            axis: Axis::Primary,
            points: series.xy(),
        }
    }

    pub fn raw(series: &Series, color: SeriesColor, line_width: u32) -> Self {
        Self {
            label: series.name.clone(),
            color,
            line_width,
            axis: Axis::Primary,
            points: series
                .points
                .iter()
                .map(|p| (p.ordinal as f64, p.value))
                .collect(),
        }
    }

    pub fn on_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, y)| *y).collect()
    }
}

/// A complete chart: titles plus the series to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub secondary_y_label: Option<String>,
    pub width: u32,
    pub height: u32,
    pub series: Vec<PlotSeries>,
}

impl Figure {
    pub fn new(title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            secondary_y_label: None,
            width: 1200,
            height: 800,
            series: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_secondary_axis(mut self, label: impl Into<String>) -> Self {
        self.secondary_y_label = Some(label.into());
        self
    }

    pub fn push(&mut self, series: PlotSeries) {
        self.series.push(series);
    }

    pub fn has_secondary(&self) -> bool {
        self.series.iter().any(|s| s.axis == Axis::Secondary)
    }

    /// Inclusive x range over every series, or `None` when nothing has points.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let xs: Vec<f64> = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|(x, _)| *x))
            .collect();
        Extent::of(&xs).map(|e| (e.min, e.max))
    }

    /// Inclusive y range over the series on `axis`.
    pub fn y_range(&self, axis: Axis) -> Option<(f64, f64)> {
        let ys: Vec<f64> = self
            .series
            .iter()
            .filter(|s| s.axis == axis)
            .flat_map(|s| s.values())
            .collect();
        Extent::of(&ys).map(|e| (e.min, e.max))
    }
}

/// Anything that can present a `Figure`.
pub trait Renderer {
    fn render(&self, figure: &Figure) -> Result<()>;
}

/// Widen a degenerate or tight range by 5% so lines don't sit on the frame.
pub fn padded(range: (f64, f64)) -> (f64, f64) {
    let (lo, hi) = range;
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        let pad = lo.abs().max(1.0) * 0.05;
        return (lo - pad, hi + pad);
    }
    (lo - span * 0.05, hi + span * 0.05)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    fn smoothed(name: &str, points: &[(i64, f64)]) -> SmoothedSeries {
        SmoothedSeries {
            name: name.into(),
            window: 2,
            points: points.iter().map(|&(o, v)| Point::new(o, v)).collect(),
        }
    }

    #[test]
    fn test_figure_ranges() {
        let mut figure = Figure::new("Run", "Episode", "Reward").with_secondary_axis("Epsilon");
        figure.push(PlotSeries::smoothed(&smoothed("Training", &[(1, 15.0), (2, 25.0)]), SeriesColor::Red, 1));
        figure.push(
            PlotSeries::raw(
                &Series::new("Epsilon", vec![Point::new(0, 1.0), Point::new(9, 0.1)]),
                SeriesColor::Orange,
                1,
            )
            .on_axis(Axis::Secondary),
        );

        assert!(figure.has_secondary());
        assert_eq!(figure.x_range(), Some((0.0, 9.0)));
        assert_eq!(figure.y_range(Axis::Primary), Some((15.0, 25.0)));
        assert_eq!(figure.y_range(Axis::Secondary), Some((0.1, 1.0)));
    }

    #[test]
    fn test_empty_figure_has_no_range() {
        let figure = Figure::new("Run", "Episode", "Reward");
        assert_eq!(figure.x_range(), None);
        assert!(!figure.has_secondary());
    }

    #[test]
    fn test_smoothed_series_label() {
        let series = PlotSeries::smoothed(&smoothed("Validation reward", &[(3, 1.0)]), SeriesColor::Blue, 2);
        assert_eq!(series.label, "Validation reward (2-episode moving average)");
        assert_eq!(series.points, vec![(3.0, 1.0)]);
        assert_eq!(series.line_width, 2);
    }

    #[test]
    fn test_padded() {
        assert_eq!(padded((0.0, 10.0)), (-0.5, 10.5));
        let (lo, hi) = padded((5.0, 5.0));
        assert!(lo < 5.0 && hi > 5.0);
    }
}
