//! Typed failures for the parser and the smoother.
//!
//! The core never logs and never recovers: every error carries enough
//! context (line index, raw line) for the caller to report it.

use thiserror::Error;

/// The log text does not match its declared structure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LogFormatError {
    /// A header count line is missing `": "` or its value is not an integer.
    #[error("line {line}: malformed `{field}` header {content:?}: {reason}")]
    Header {
        line: usize,
        field: &'static str,
        content: String,
        reason: String,
    },

    /// The document has fewer lines than the header or a block requires.
    #[error("{block} needs {expected} lines but the log has only {actual}")]
    Truncated {
        block: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A record line has fewer `", "`-separated fields than required.
    #[error("line {line}: expected at least {expected} fields, found {found} in {content:?}")]
    MissingField {
        line: usize,
        expected: usize,
        found: usize,
        content: String,
    },

    /// A record field did not parse as its declared type.
    #[error("line {line}: field `{column}` is not a valid {kind}: {value:?} in {content:?}")]
    InvalidField {
        line: usize,
        column: &'static str,
        kind: &'static str,
        value: String,
        content: String,
    },
}

impl LogFormatError {
    /// 0-based line index of the offending line, if the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Header { line, .. }
            | Self::MissingField { line, .. }
            | Self::InvalidField { line, .. } => Some(*line),
            Self::Truncated { .. } => None,
        }
    }
}

/// The smoothing window is unusable for the given series.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingError {
    #[error("invalid smoothing window {window} for a series of {len} points (need 1..={len})")]
    InvalidWindow { window: usize, len: usize },
}

/// Crate-level error for callers that drive the whole pipeline.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] LogFormatError),

    #[error(transparent)]
    Smoothing(#[from] SmoothingError),

    /// Reading the log file failed. Passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
