//! End-to-end run: read → parse → smooth → figure.
//!
//! This is the layer that talks to the filesystem and logs progress. The
//! parser and smoother it drives stay pure; any failure in them aborts the
//! run for the file, there is no partial plot.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{PlotConfig, StyleConfig};
use crate::error::Result;
use crate::log_format::{ParsedLog, parse_with};
use crate::rendering::{Axis, Figure, PlotSeries};
use crate::smoothing::moving_average;
use crate::types::{Series, SmoothedSeries};

/// Smoothed curves for one log, ready to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedLog {
    pub training_rewards: SmoothedSeries,
    /// `None` when the log has no validation episodes.
    pub validation_rewards: Option<SmoothedSeries>,
    /// Raw, unsmoothed epsilon schedule.
    pub epsilons: Series,
}

impl SmoothedLog {
    pub fn curves(&self) -> Vec<&SmoothedSeries> {
        std::iter::once(&self.training_rewards)
            .chain(self.validation_rewards.as_ref())
            .collect()
    }
}

/// Read and parse the log named by `config`.
///
/// I/O errors come back as `Error::Io` untouched.
pub fn load_log(config: &PlotConfig) -> Result<ParsedLog> {
    let started = Instant::now();
    let text = std::fs::read_to_string(&config.path)?;
    let log = parse_with(&text, config.format)?;

    info!(
        "parsed {}: {} training, {} validation episodes",
        config.path.display(),
        log.training_rewards.len(),
        log.validation_rewards.len()
    );
    for (name, value) in &log.header.fields {
        debug!("  {name}: {value}");
    }
    debug!("parse took {:.2?}", started.elapsed());
    Ok(log)
}

/// Apply the configured windows.
pub fn smooth_log(log: &ParsedLog, config: &PlotConfig) -> Result<SmoothedLog> {
    let training_rewards = moving_average(&log.training_rewards, config.training_window)?;
    info!(
        "training reward: {} points with window {}",
        training_rewards.len(),
        config.training_window
    );

    let validation_rewards = if log.validation_rewards.is_empty() {
        if log.version.schema().blocks.len() > 1 {
            warn!("no validation episodes in {}, skipping that curve", config.path.display());
        }
        None
    } else {
        let smoothed = moving_average(&log.validation_rewards, config.validation_window)?;
        info!(
            "validation reward: {} points with window {}",
            smoothed.len(),
            config.validation_window
        );
        Some(smoothed)
    };

    Ok(SmoothedLog {
        training_rewards,
        validation_rewards,
        epsilons: log.training_epsilons.clone(),
    })
}

/// `load_log` followed by `smooth_log`.
pub fn run(config: &PlotConfig) -> Result<SmoothedLog> {
    let log = load_log(config)?;
    smooth_log(&log, config)
}

/// Lay the curves out on a `Figure`. Epsilon goes on the secondary axis.
pub fn build_figure(
    config: &PlotConfig,
    style: &StyleConfig,
    smoothed: &SmoothedLog,
    include_epsilon: bool,
) -> Figure {
    let mut figure = Figure::new(&config.title, &style.x_label, &style.y_label)
        .with_size(style.width, style.height);

    figure.push(PlotSeries::smoothed(
        &smoothed.training_rewards,
        style.training_color,
        style.line_width,
    ));
    if let Some(validation) = &smoothed.validation_rewards {
        figure.push(PlotSeries::smoothed(
            validation,
            style.validation_color,
            style.line_width,
        ));
    }
    if include_epsilon && !smoothed.epsilons.is_empty() {
        figure = figure.with_secondary_axis(&style.epsilon_label);
        figure.push(
            PlotSeries::raw(&smoothed.epsilons, style.epsilon_color, style.line_width)
                .on_axis(Axis::Secondary),
        );
    }
    figure
}

#[derive(Serialize)]
struct Export<'a> {
    title: &'a str,
    series: Vec<&'a SmoothedSeries>,
}

/// Write the smoothed curves as pretty JSON.
pub fn export_json(path: &Path, title: &str, smoothed: &SmoothedLog) -> anyhow::Result<()> {
    let export = Export {
        title,
        series: smoothed.curves(),
    };
    let json = serde_json::to_string_pretty(&export)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    info!("exported {} series to {}", export.series.len(), path.display());
    Ok(())
}
