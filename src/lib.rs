//! rewardplot - smoothed learning curves from RL training logs
//!
//! Reads the plain-text log a tabular Q-learning run writes at the end of
//! training, smooths the reward columns with a moving average, and draws
//! the curves (with the epsilon schedule on a second axis if asked).
//!
//! # Architecture
//!
//! ```text
//! Log file → LogDocument → Series ×3 → Moving Average → Figure → Renderer
//!     ↓           ↓            ↓              ↓            ↓          ↓
//!   std::fs    LogSchema    reward,      prefix sum,   explicit   plotters /
//!              validation   epsilon      midpoint      chart      sparklines
//!                                        ordinals      object
//! ```
//!
//! `log_format` and `smoothing` are pure: they return typed errors and never
//! log. `pipeline` does the I/O and progress logging around them.

pub mod config;
pub mod error;
pub mod log_format;
pub mod pipeline;
pub mod rendering;
pub mod smoothing;
pub mod types;

// Re-export core types
pub use types::{EpisodeRecord, Extent, Point, Series, SmoothedSeries};

pub use config::{PlotConfig, StyleConfig};
pub use error::{Error, LogFormatError, SmoothingError};
pub use log_format::{FormatVersion, LogDocument, LogSchema, ParsedLog, RunHeader, parse, parse_with};
pub use smoothing::{aligned_ordinals, moving_average, moving_average_values};
