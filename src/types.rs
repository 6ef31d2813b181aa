//! Core types shared by the parser, the smoother and the renderers.
//!
//! Everything here is built once and never mutated afterwards:
//! - `EpisodeRecord` is one parsed record line
//! - `Series` is a named column of `(ordinal, value)` points in file order
//! - `SmoothedSeries` is a `Series` after a moving average, plus its window

use serde::Serialize;

/// One episode line from a training or validation block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeRecord {
    pub ordinal: i64,
    pub reward: f64,
    /// Exploration rate at the time of the episode. Training records only.
    pub epsilon: Option<f64>,
}

/// A single plotted point: original episode ordinal and its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub ordinal: i64,
    pub value: f64,
}

impl Point {
    pub fn new(ordinal: i64, value: f64) -> Self {
        Self { ordinal, value }
    }
}

/// A named, ordered sequence of points. Order is file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    pub name: String,
    pub points: Vec<Point>,
}

impl Series {
    pub fn new(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Build a series by projecting one column out of a record block.
    pub fn from_records<F>(name: impl Into<String>, records: &[EpisodeRecord], column: F) -> Self
    where
        F: Fn(&EpisodeRecord) -> Option<f64>,
    {
        let points = records
            .iter()
            .filter_map(|r| column(r).map(|v| Point::new(r.ordinal, v)))
            .collect();
        Self::new(name, points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn ordinals(&self) -> Vec<i64> {
        self.points.iter().map(|p| p.ordinal).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Output of a moving average. `points.len() == source_len - window + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedSeries {
    pub name: String,
    pub window: usize,
    pub points: Vec<Point>,
}

impl SmoothedSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points as `(x, y)` pairs for a chart backend.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|p| (p.ordinal as f64, p.value))
            .collect()
    }

    /// Legend text in the form the training notebooks used.
    pub fn legend_label(&self) -> String {
        format!("{} ({}-episode moving average)", self.name, self.window)
    }
}

/// Summary statistics over a sequence of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub first: f64,
    pub last: f64,
    pub min: f64,
    pub max: f64,
}

impl Extent {
    /// `None` for an empty slice.
    pub fn of(values: &[f64]) -> Option<Self> {
        let first = *values.first()?;
        let last = *values.last()?;
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            first,
            last,
            min,
            max,
        })
    }

    pub fn delta(&self) -> f64 {
        self.last - self.first
    }
}
