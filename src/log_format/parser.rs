//! Schema-driven parser for training logs.
//!
//! Parsing happens in three passes over an already materialized document:
//! 1. Count fields: read every `"<label>: <n>"` line the schema names
//! 2. Structure: lay the blocks out and check the document is long enough
//! 3. Records: split each record line on `", "` and parse its columns
//!
//! A malformed count line fails in pass 1, before any record is read.

use crate::error::LogFormatError;
use crate::types::{EpisodeRecord, Series};

use super::schema::{BlockKind, BlockRange, BlockSpec, Column, FormatVersion, LogSchema};

const FIELD_SEPARATOR: &str = ", ";
const HEADER_SEPARATOR: &str = ": ";

/// Raw log text split into lines, tagged with its layout version.
///
/// Lines are split on `'\n'`; a trailing `'\r'` from CRLF files is dropped
/// with it, so offsets are identical for both line endings.
#[derive(Debug, Clone)]
pub struct LogDocument<'a> {
    version: FormatVersion,
    lines: Vec<&'a str>,
}

impl<'a> LogDocument<'a> {
    pub fn new(text: &'a str, version: FormatVersion) -> Self {
        Self {
            version,
            lines: text.lines().collect(),
        }
    }

    pub fn parse(&self) -> Result<ParsedLog, LogFormatError> {
        let schema = self.version.schema();

        // Pass 1: counts
        let mut counts = Vec::with_capacity(schema.counts.len());
        for field in &schema.counts {
            let content = self.lines.get(field.line).ok_or_else(|| LogFormatError::Truncated {
                block: "header",
                expected: schema.min_header_len(),
                actual: self.lines.len(),
            })?;
            counts.push((field.name, parse_count(field.line, field.name, content)?));
        }

        // Pass 2: structure
        let count_of = |name: &str| {
            counts
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, c)| *c)
                .unwrap_or(0)
        };
        let ranges = schema
            .layout(count_of)
            .map_err(|field| self.count_overflow(&schema, field, count_of(field)))?;
        for range in &ranges {
            if range.len > 0 && range.end() > self.lines.len() {
                return Err(LogFormatError::Truncated {
                    block: range.spec.kind.label(),
                    expected: range.end(),
                    actual: self.lines.len(),
                });
            }
        }

        // Pass 3: records
        let mut training = Vec::new();
        let mut validation = Vec::new();
        for range in &ranges {
            let records = self.parse_block(range)?;
            match range.spec.kind {
                BlockKind::Training => training = records,
                BlockKind::Validation => validation = records,
            }
        }

        Ok(ParsedLog {
            version: self.version,
            header: RunHeader::from_lines(&self.lines, &schema),
            training_rewards: Series::from_records(TRAINING_REWARD, &training, |r| Some(r.reward)),
            training_epsilons: Series::from_records(TRAINING_EPSILON, &training, |r| r.epsilon),
            validation_rewards: Series::from_records(VALIDATION_REWARD, &validation, |r| {
                Some(r.reward)
            }),
        })
    }

    fn count_overflow(&self, schema: &LogSchema, field: &'static str, count: usize) -> LogFormatError {
        let line = schema.count_field(field).map_or(0, |c| c.line);
        LogFormatError::Header {
            line,
            field,
            content: self.lines.get(line).copied().unwrap_or_default().to_string(),
            reason: format!("{count} records cannot fit in any log"),
        }
    }

    fn parse_block(&self, range: &BlockRange) -> Result<Vec<EpisodeRecord>, LogFormatError> {
        (range.start..range.end())
            .map(|idx| parse_record(idx, self.lines[idx], &range.spec))
            .collect()
    }
}

pub const TRAINING_REWARD: &str = "Training reward";
pub const TRAINING_EPSILON: &str = "Epsilon";
pub const VALIDATION_REWARD: &str = "Validation reward";

/// Everything extracted from one log.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLog {
    pub version: FormatVersion,
    pub header: RunHeader,
    pub training_rewards: Series,
    pub training_epsilons: Series,
    pub validation_rewards: Series,
}

/// `"<name>: <value>"` lines from the header, in file order.
///
/// Informational only (hyperparameters, wall time). Header lines without a
/// `": "` separator are not part of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunHeader {
    pub fields: Vec<(String, String)>,
}

impl RunHeader {
    fn from_lines(lines: &[&str], schema: &LogSchema) -> Self {
        let fields = lines
            .iter()
            .take(schema.header_lines)
            .filter_map(|line| line.split_once(HEADER_SEPARATOR))
            .map(|(name, value)| (name.trim().to_string(), value.trim().to_string()))
            .collect();
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Parse a training log laid out as `FormatVersion::Split`.
pub fn parse(text: &str) -> Result<ParsedLog, LogFormatError> {
    parse_with(text, FormatVersion::Split)
}

pub fn parse_with(text: &str, version: FormatVersion) -> Result<ParsedLog, LogFormatError> {
    LogDocument::new(text, version).parse()
}

/// Value after the first `": "` of a count line, as a non-negative integer.
fn parse_count(line: usize, field: &'static str, content: &str) -> Result<usize, LogFormatError> {
    let header_err = |reason: String| LogFormatError::Header {
        line,
        field,
        content: content.to_string(),
        reason,
    };

    let value = content
        .split(HEADER_SEPARATOR)
        .nth(1)
        .ok_or_else(|| header_err(format!("missing {HEADER_SEPARATOR:?} separator")))?;

    value
        .trim()
        .parse::<usize>()
        .map_err(|e| header_err(format!("{value:?} is not a count ({e})")))
}

fn parse_record(line: usize, content: &str, spec: &BlockSpec) -> Result<EpisodeRecord, LogFormatError> {
    let fields: Vec<&str> = content.split(FIELD_SEPARATOR).collect();
    let required = spec.required_fields();
    if fields.len() < required {
        return Err(LogFormatError::MissingField {
            line,
            expected: required,
            found: fields.len(),
            content: content.to_string(),
        });
    }

    let invalid = |column: Column, kind: &'static str| LogFormatError::InvalidField {
        line,
        column: column.name(),
        kind,
        value: fields[column.index()].to_string(),
        content: content.to_string(),
    };

    let ordinal = fields[Column::Ordinal.index()]
        .trim()
        .parse::<i64>()
        .map_err(|_| invalid(Column::Ordinal, "integer"))?;
    let reward = fields[Column::Reward.index()]
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid(Column::Reward, "number"))?;
    let epsilon = if spec.has_column(Column::Epsilon) {
        let value = fields[Column::Epsilon.index()]
            .trim()
            .parse::<f64>()
            .map_err(|_| invalid(Column::Epsilon, "number"))?;
        Some(value)
    } else {
        None
    };

    Ok(EpisodeRecord {
        ordinal,
        reward,
        epsilon,
    })
}
