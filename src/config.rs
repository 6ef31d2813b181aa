//! Run configuration and chart styling.
//!
//! Two layers:
//! - `PlotConfig`: what to plot (log path, title, windows, format), from the CLI
//! - `StyleConfig`: how to draw it, from `rewardplot.toml`
//!
//! ## Example
//!
//! ```toml
//! width = 1600
//! height = 900
//! line-width = 2
//! training-color = "blue"
//! validation-color = "#2ca02c"
//! epsilon-color = "orange"
//! x-label = "Episode"
//! y-label = "Reward"
//! epsilon-label = "Epsilon"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;

use crate::error::Error;
use crate::log_format::FormatVersion;
use crate::rendering::SeriesColor;

/// Name of the style file searched next to the log and in the working directory.
pub const STYLE_FILE_NAME: &str = "rewardplot.toml";

/// What to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub path: PathBuf,
    pub title: String,
    pub training_window: usize,
    pub validation_window: usize,
    pub format: FormatVersion,
}

impl PlotConfig {
    /// Config with the format's default windows.
    pub fn new(path: impl Into<PathBuf>, title: impl Into<String>, format: FormatVersion) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            training_window: format.default_training_window(),
            validation_window: format.default_validation_window(),
            format,
        }
    }

    pub fn with_windows(mut self, training: Option<usize>, validation: Option<usize>) -> Self {
        if let Some(w) = training {
            self.training_window = w;
        }
        if let Some(w) = validation {
            self.validation_window = w;
        }
        self
    }

    /// Format config for verbose display.
    pub fn display_summary(&self) -> String {
        let mut lines = vec![
            format!("   Log: {}", self.path.display()),
            format!("   Format: {}", self.format),
            format!("   Training window: {}", self.training_window),
        ];
        if self.format == FormatVersion::Split {
            lines.push(format!("   Validation window: {}", self.validation_window));
        }
        lines.join("\n")
    }
}

/// How to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    /// Source file for this config (for display).
    pub source: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub training_color: SeriesColor,
    pub validation_color: SeriesColor,
    pub epsilon_color: SeriesColor,
    pub x_label: String,
    pub y_label: String,
    pub epsilon_label: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            source: None,
            width: 1200,
            height: 800,
            line_width: 1,
            training_color: SeriesColor::Red,
            validation_color: SeriesColor::Blue,
            epsilon_color: SeriesColor::Orange,
            x_label: "Episode".to_string(),
            y_label: "Reward".to_string(),
            epsilon_label: "Epsilon".to_string(),
        }
    }
}

/// Raw config as deserialized from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawStyle {
    width: Option<u32>,
    height: Option<u32>,
    line_width: Option<u32>,
    training_color: Option<String>,
    validation_color: Option<String>,
    epsilon_color: Option<String>,
    x_label: Option<String>,
    y_label: Option<String>,
    epsilon_label: Option<String>,
}

impl StyleConfig {
    /// Resolve the style for a log file.
    ///
    /// Search order:
    /// 1. `explicit` (errors are fatal)
    /// 2. rewardplot.toml next to the log file
    /// 3. rewardplot.toml in the working directory
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>, log_path: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let mut candidates = Vec::new();
        if let Some(dir) = log_path.parent() {
            candidates.push(dir.join(STYLE_FILE_NAME));
        }
        candidates.push(PathBuf::from(STYLE_FILE_NAME));

        for candidate in candidates {
            if !candidate.exists() {
                continue;
            }
            match Self::from_file(&candidate) {
                Ok(style) => {
                    debug!("using style config {}", candidate.display());
                    return Ok(style);
                }
                Err(e) => warn!("ignoring {}: {:#}", candidate.display(), e),
            }
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read style config {}", path.display()))?;
        let mut style = Self::from_toml(&content)
            .with_context(|| format!("failed to parse style config {}", path.display()))?;
        style.source = Some(path.to_path_buf());
        Ok(style)
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, Error> {
        let raw: RawStyle = toml::from_str(content).map_err(|e| Error::config(e.to_string()))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawStyle) -> std::result::Result<Self, Error> {
        let defaults = Self::default();
        let color = |value: Option<String>, fallback: SeriesColor| match value {
            Some(v) => v.parse::<SeriesColor>().map_err(Error::config),
            None => Ok(fallback),
        };

        let style = Self {
            source: None,
            width: raw.width.unwrap_or(defaults.width),
            height: raw.height.unwrap_or(defaults.height),
            line_width: raw.line_width.unwrap_or(defaults.line_width),
            training_color: color(raw.training_color, defaults.training_color)?,
            validation_color: color(raw.validation_color, defaults.validation_color)?,
            epsilon_color: color(raw.epsilon_color, defaults.epsilon_color)?,
            x_label: raw.x_label.unwrap_or(defaults.x_label),
            y_label: raw.y_label.unwrap_or(defaults.y_label),
            epsilon_label: raw.epsilon_label.unwrap_or(defaults.epsilon_label),
        };

        if style.width == 0 || style.height == 0 {
            return Err(Error::config(format!(
                "chart size must be positive, got {}x{}",
                style.width, style.height
            )));
        }
        if style.line_width == 0 {
            return Err(Error::config("line-width must be at least 1"));
        }
        Ok(style)
    }

    pub fn display_summary(&self) -> String {
        match self.source {
            Some(ref source) => format!("   Style: {}", source.display()),
            None => "   Style: (defaults)".to_string(),
        }
    }
}
