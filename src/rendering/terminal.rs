//! Terminal rendering: one sparkline row per series.
//!
//! ```text
//!  Run 7 (lr sweep)
//!   Training reward (1000-episode moving average)
//!           [▁▁▂▂▃▄▄▅▅▆▆▇▇▇██████████████████▇██████]
//!           -3.2150 → 7.8811  (+11.0961)  min -3.2150  max 7.9012
//! ```

use std::fmt::Write as _;

use anyhow::Result;

use crate::types::Extent;

use super::colors::Colorizer;
use super::figure::{Figure, Renderer};

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Prints a `Figure` as sparklines on stdout.
pub struct TerminalRenderer {
    width: usize,
    colors: Colorizer,
}

impl TerminalRenderer {
    pub fn new(width: usize, color: bool) -> Self {
        Self {
            width: width.max(1),
            colors: Colorizer::new(color),
        }
    }

    pub fn render_to_string(&self, figure: &Figure) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.colors.heading(&format!(" {} ", figure.title)));

        for series in &figure.series {
            let values = series.values();
            let _ = writeln!(out, "  {}", self.colors.heading(&series.label));

            let Some(extent) = Extent::of(&values) else {
                let _ = writeln!(out, "          {}", self.colors.dim("(no points)"));
                continue;
            };

            let line = sparkline(&values, self.width);
            let _ = writeln!(out, "          [{}]", self.colors.paint(&line, series.color.style()));
            let _ = writeln!(
                out,
                "          {:.4} → {:.4}  ({})  min {:.4}  max {:.4}",
                extent.first,
                extent.last,
                self.colors.delta(extent.delta()),
                extent.min,
                extent.max
            );
        }
        out
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, figure: &Figure) -> Result<()> {
        print!("{}", self.render_to_string(figure));
        Ok(())
    }
}

/// One block character per column, scaled between the lowest and highest column.
///
/// A series longer than `width` is split into `width` contiguous buckets and
/// each column shows its bucket mean, so a spike inside a bucket is damped
/// rather than hit-or-miss. Shorter series are left-aligned and padded.
pub fn sparkline(values: &[f64], width: usize) -> String {
    let columns = bucket_means(values, width);
    let Some(extent) = Extent::of(&columns) else {
        return " ".repeat(width);
    };
    let span = (extent.max - extent.min).max(f64::EPSILON);
    let top = SPARK_CHARS.len() - 1;

    let mut line: String = columns
        .iter()
        .map(|&v| {
            let level = ((v - extent.min) / span * top as f64).round() as usize;
            SPARK_CHARS[level.min(top)]
        })
        .collect();
    line.extend(std::iter::repeat_n(' ', width - columns.len()));
    line
}

/// Mean of each of `width` equal slices of `values`, or `values` itself when
/// it already fits.
fn bucket_means(values: &[f64], width: usize) -> Vec<f64> {
    if values.len() <= width {
        return values.to_vec();
    }
    (0..width)
        .map(|i| {
            let bucket = &values[i * values.len() / width..(i + 1) * values.len() / width];
            bucket.iter().sum::<f64>() / bucket.len() as f64
        })
        .collect()
}
