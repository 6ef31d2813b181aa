//! Training log parsing.
//!
//! This module handles:
//! - Describing each log layout as an explicit `LogSchema`
//! - Validating header counts and block extents before reading records
//! - Turning record lines into reward and epsilon `Series`
//!
//! # Format Versions
//!
//! - `FormatVersion::Split`: training block then validation block (default)
//! - `FormatVersion::SingleBlock`: earlier logs with one block and no split

mod parser;
mod schema;

pub use parser::{
    LogDocument, ParsedLog, RunHeader, TRAINING_EPSILON, TRAINING_REWARD, VALIDATION_REWARD,
    parse, parse_with,
};
pub use schema::{BlockKind, BlockRange, BlockSpec, Column, CountField, FormatVersion, LogSchema};
