//! rewardplot CLI - learning curves from RL training logs
//!
//! Orchestrates the pipeline for one log file:
//!
//! 1. Parse: validate the header and read the training/validation blocks
//! 2. Smooth: moving average per reward series, midpoint-aligned
//! 3. Render: PNG/SVG chart, or sparklines with --terminal
//! 4. Export: optional JSON dump of the smoothed curves
//!
//! Any parse or smoothing failure aborts with a non-zero exit; nothing is
//! drawn from a partially valid log.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use rewardplot::config::{PlotConfig, StyleConfig};
use rewardplot::log_format::FormatVersion;
use rewardplot::pipeline;
use rewardplot::rendering::{ChartRenderer, Renderer, TerminalRenderer};

/// Plot smoothed reward curves from a training log
///
/// Examples:
///   rewardplot run.txt "Gridworld 8x8"             # 1000/100-episode windows
///   rewardplot run.txt "Gridworld 8x8" 500 50      # custom windows
///   rewardplot run.txt "Cliff" --epsilon -o a.svg  # epsilon on a second axis
///   rewardplot old.txt "Old run" --format single   # single-block logs
#[derive(Parser, Debug)]
#[command(name = "rewardplot")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Training log written at the end of a run
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Chart title
    #[arg(value_name = "TITLE")]
    pub title: String,

    /// Training reward window (default 1000, or 50 with --format single)
    #[arg(value_name = "TRAIN_WINDOW")]
    pub train_window: Option<usize>,

    /// Validation reward window (default 100)
    #[arg(value_name = "VAL_WINDOW")]
    pub val_window: Option<usize>,

    /// Log layout: split (training + validation) or single (one block)
    #[arg(long, default_value = "split")]
    pub format: FormatVersion,

    /// Chart file to write (.png or .svg)
    ///
    /// Defaults to the log path with a .png extension.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print sparklines to the terminal instead of writing a chart
    #[arg(long)]
    pub terminal: bool,

    /// Also plot the raw epsilon schedule on a secondary axis
    #[arg(long)]
    pub epsilon: bool,

    /// Write the smoothed curves to a JSON file
    #[arg(long, value_name = "FILE")]
    pub export: Option<PathBuf>,

    /// Style file (defaults to rewardplot.toml next to the log, then in cwd)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output
    ///
    /// Logs episode counts, windows and timings to stderr.
    /// RUST_LOG overrides the level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored terminal output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    fn plot_config(&self) -> PlotConfig {
        PlotConfig::new(&self.path, &self.title, self.format)
            .with_windows(self.train_window, self.val_window)
    }

    fn chart_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.path.with_extension("png"))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(&cli)
}

fn init_logging(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.plot_config();
    let style = StyleConfig::load(cli.config.as_deref(), &config.path)?;

    info!("rewardplot v{}", env!("CARGO_PKG_VERSION"));
    info!("\n{}\n{}", config.display_summary(), style.display_summary());

    let smoothed = pipeline::run(&config)
        .with_context(|| format!("failed to plot {}", config.path.display()))?;

    if let Some(export) = &cli.export {
        pipeline::export_json(export, &config.title, &smoothed)?;
    }

    let figure = pipeline::build_figure(&config, &style, &smoothed, cli.epsilon);

    if cli.terminal {
        TerminalRenderer::new(40, !cli.no_color).render(&figure)?;
    } else {
        let renderer = ChartRenderer::new(cli.chart_path())?;
        renderer.render(&figure)?;
        println!("Saved chart to {}", renderer.output().display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_minimal() {
        let cli = Cli::parse_from(["rewardplot", "run.txt", "Gridworld"]);
        assert_eq!(cli.path, PathBuf::from("run.txt"));
        assert_eq!(cli.title, "Gridworld");
        assert_eq!(cli.train_window, None);
        assert_eq!(cli.format, FormatVersion::Split);

        let config = cli.plot_config();
        assert_eq!(config.training_window, 1000);
        assert_eq!(config.validation_window, 100);
    }

    #[test]
    fn test_cli_parse_windows() {
        let cli = Cli::parse_from(["rewardplot", "run.txt", "Gridworld", "500", "25"]);
        let config = cli.plot_config();
        assert_eq!(config.training_window, 500);
        assert_eq!(config.validation_window, 25);
    }

    #[test]
    fn test_cli_rejects_negative_window() {
        assert!(Cli::try_parse_from(["rewardplot", "run.txt", "T", "-5"]).is_err());
    }

    #[test]
    fn test_cli_requires_title() {
        assert!(Cli::try_parse_from(["rewardplot", "run.txt"]).is_err());
    }

    #[test]
    fn test_cli_parse_single_format() {
        let cli = Cli::parse_from(["rewardplot", "old.txt", "Old", "--format", "single"]);
        assert_eq!(cli.format, FormatVersion::SingleBlock);
        assert_eq!(cli.plot_config().training_window, 50);
    }

    #[test]
    fn test_cli_parse_flags() {
        let cli = Cli::parse_from([
            "rewardplot",
            "run.txt",
            "T",
            "--terminal",
            "--epsilon",
            "--verbose",
            "--no-color",
            "--export",
            "curves.json",
        ]);
        assert!(cli.terminal);
        assert!(cli.epsilon);
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.export, Some(PathBuf::from("curves.json")));
    }

    #[test]
    fn test_chart_path_defaults_next_to_log() {
        let cli = Cli::parse_from(["rewardplot", "logs/run_01.txt", "T"]);
        assert_eq!(cli.chart_path(), PathBuf::from("logs/run_01.png"));

        let cli = Cli::parse_from(["rewardplot", "logs/run_01.txt", "T", "-o", "out.svg"]);
        assert_eq!(cli.chart_path(), PathBuf::from("out.svg"));
    }
}
