//! Image export via plotters (optional feature).
//!
//! PNG or SVG is picked from the output extension. Series on the secondary
//! axis get a right-hand y-axis; the legend sits in the upper left.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use super::figure::{Figure, Renderer};

/// Output image kind, from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => Ok(ImageFormat::Png),
            Some("svg") => Ok(ImageFormat::Svg),
            _ => bail!(
                "unsupported chart output {} (use a .png or .svg file name)",
                path.display()
            ),
        }
    }
}

/// Writes a `Figure` to an image file.
pub struct ChartRenderer {
    output: PathBuf,
    format: ImageFormat,
}

impl ChartRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Result<Self> {
        let output = output.into();
        let format = ImageFormat::from_path(&output)?;
        Ok(Self { output, format })
    }

    pub fn output(&self) -> &Path {
        &self.output
    }
}

impl Renderer for ChartRenderer {
    fn render(&self, figure: &Figure) -> Result<()> {
        if figure.x_range().is_none() {
            bail!("nothing to plot: every series is empty");
        }
        draw::draw_figure(&self.output, self.format, figure)
    }
}

#[cfg(feature = "plotters")]
mod draw {
    use std::path::Path;

    use anyhow::{Result, anyhow};
    use plotters::coord::Shift;
    use plotters::prelude::*;

    use super::ImageFormat;
    use crate::rendering::figure::{Axis, Figure, padded};

    pub(super) fn draw_figure(output: &Path, format: ImageFormat, figure: &Figure) -> Result<()> {
        let size = (figure.width, figure.height);
        let drawn = match format {
            ImageFormat::Png => draw_on(BitMapBackend::new(output, size).into_drawing_area(), figure),
            ImageFormat::Svg => draw_on(SVGBackend::new(output, size).into_drawing_area(), figure),
        };
        drawn.map_err(|e| anyhow!("failed to draw chart {}: {}", output.display(), e))
    }

    fn draw_on<DB>(root: DrawingArea<DB, Shift>, figure: &Figure) -> Result<(), Box<dyn std::error::Error>>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        root.fill(&WHITE)?;

        let (x_lo, x_hi) = padded(figure.x_range().unwrap_or((0.0, 1.0)));
        let (y_lo, y_hi) = padded(figure.y_range(Axis::Primary).unwrap_or((0.0, 1.0)));
        let (s_lo, s_hi) = figure
            .y_range(Axis::Secondary)
            .map(|(lo, hi)| (lo.min(0.0), hi.max(1.0)))
            .unwrap_or((0.0, 1.0));

        let mut chart = ChartBuilder::on(&root)
            .caption(&figure.title, ("sans-serif", 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .right_y_label_area_size(if figure.has_secondary() { 60 } else { 0 })
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?
            .set_secondary_coord(x_lo..x_hi, s_lo..s_hi);

        chart
            .configure_mesh()
            .x_desc(figure.x_label.as_str())
            .y_desc(figure.y_label.as_str())
            .draw()?;

        if figure.has_secondary() {
            chart
                .configure_secondary_axes()
                .y_desc(figure.secondary_y_label.as_deref().unwrap_or(""))
                .draw()?;
        }

        for series in &figure.series {
            let (r, g, b) = series.color.rgb();
            let color = RGBColor(r, g, b);
            let style = color.stroke_width(series.line_width);
            let line = LineSeries::new(series.points.iter().copied(), style);

            let anno = match series.axis {
                Axis::Primary => chart.draw_series(line)?,
                Axis::Secondary => chart.draw_secondary_series(line)?,
            };
            anno.label(series.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

/// Stub when plotters feature is disabled.
#[cfg(not(feature = "plotters"))]
mod draw {
    use std::path::Path;

    use anyhow::{Result, bail};

    use super::ImageFormat;
    use crate::rendering::figure::Figure;

    pub(super) fn draw_figure(_output: &Path, _format: ImageFormat, _figure: &Figure) -> Result<()> {
        bail!("chart export requires --features plotters; use --terminal instead")
    }
}
