//! Declarative layout of a training log.
//!
//! A log is a fixed header followed by count-prefixed record blocks. Rather
//! than indexing lines at the call site, each `FormatVersion` produces a
//! `LogSchema` naming where its counts live, how many lines precede each
//! block, and which columns each record must carry. The parser validates
//! the document against the schema before it touches a single record.
//!
//! ```text
//! Split (current)                      SingleBlock (earlier runs)
//! 0  epsilon: 1, 0.05, 0.999           0..3  hyperparameters
//! 1  alpha: 0.5, 0.01, 0.999           4     episodes: N
//! 2  gamma: 0.95                       5     column heading
//! 3  training_time: 00:12:31           6..   N training records
//! 4  training_episodes: N
//! 5  validation_episodes: M
//! 6  Training: ord, reward, ...
//! 7.. N training records
//! .  Validation: ord, reward, ...
//! .. M validation records
//! ```

use std::fmt;
use std::str::FromStr;

/// Which generation of the log layout a document follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    /// Training block followed by a validation block.
    #[default]
    Split,
    /// One training block, no validation split.
    SingleBlock,
}

impl FormatVersion {
    pub fn label(&self) -> &'static str {
        match self {
            FormatVersion::Split => "split",
            FormatVersion::SingleBlock => "single",
        }
    }

    /// Window used for the training curve when none is given.
    pub fn default_training_window(&self) -> usize {
        match self {
            FormatVersion::Split => 1000,
            FormatVersion::SingleBlock => 50,
        }
    }

    /// Window used for the validation curve when none is given.
    pub fn default_validation_window(&self) -> usize {
        100
    }

    pub fn schema(&self) -> LogSchema {
        match self {
            FormatVersion::Split => LogSchema {
                header_lines: 6,
                counts: vec![
                    CountField {
                        name: TRAINING_COUNT,
                        line: 4,
                    },
                    CountField {
                        name: VALIDATION_COUNT,
                        line: 5,
                    },
                ],
                blocks: vec![
                    BlockSpec {
                        kind: BlockKind::Training,
                        count_field: TRAINING_COUNT,
                        leading_lines: 1,
                        columns: TRAINING_COLUMNS,
                    },
                    BlockSpec {
                        kind: BlockKind::Validation,
                        count_field: VALIDATION_COUNT,
                        leading_lines: 1,
                        columns: VALIDATION_COLUMNS,
                    },
                ],
            },
            FormatVersion::SingleBlock => LogSchema {
                header_lines: 5,
                counts: vec![CountField {
                    name: EPISODE_COUNT,
                    line: 4,
                }],
                blocks: vec![BlockSpec {
                    kind: BlockKind::Training,
                    count_field: EPISODE_COUNT,
                    leading_lines: 1,
                    columns: TRAINING_COLUMNS,
                }],
            },
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormatVersion {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "split" => Ok(FormatVersion::Split),
            "single" | "single-block" => Ok(FormatVersion::SingleBlock),
            other => Err(format!("unknown log format: {other} (expected split or single)")),
        }
    }
}

const TRAINING_COUNT: &str = "training_episodes";
const VALIDATION_COUNT: &str = "validation_episodes";
const EPISODE_COUNT: &str = "episodes";

/// Columns of a record line, by position after splitting on `", "`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Ordinal,
    Reward,
    Epsilon,
}

impl Column {
    pub fn index(&self) -> usize {
        match self {
            Column::Ordinal => 0,
            Column::Reward => 1,
            Column::Epsilon => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Column::Ordinal => "ordinal",
            Column::Reward => "reward",
            Column::Epsilon => "epsilon",
        }
    }
}

const TRAINING_COLUMNS: &[Column] = &[Column::Ordinal, Column::Reward, Column::Epsilon];
const VALIDATION_COLUMNS: &[Column] = &[Column::Ordinal, Column::Reward];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Training,
    Validation,
}

impl BlockKind {
    pub fn label(&self) -> &'static str {
        match self {
            BlockKind::Training => "training",
            BlockKind::Validation => "validation",
        }
    }
}

/// A header line holding `"<label>: <count>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountField {
    pub name: &'static str,
    pub line: usize,
}

/// A record block whose length is given by a header count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    pub kind: BlockKind,
    pub count_field: &'static str,
    /// Lines between the end of the previous section and the first record.
    pub leading_lines: usize,
    pub columns: &'static [Column],
}

impl BlockSpec {
    /// Minimum number of `", "`-separated fields a record must have.
    pub fn required_fields(&self) -> usize {
        self.columns.iter().map(|c| c.index() + 1).max().unwrap_or(0)
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }
}

/// Resolved line range of one block once the counts are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub spec: BlockSpec,
    pub start: usize,
    pub len: usize,
}

impl BlockRange {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSchema {
    /// Lines before the first block's leading lines.
    pub header_lines: usize,
    pub counts: Vec<CountField>,
    pub blocks: Vec<BlockSpec>,
}

impl LogSchema {
    pub fn count_field(&self, name: &str) -> Option<&CountField> {
        self.counts.iter().find(|c| c.name == name)
    }

    /// Lines the document must have for every count line to exist.
    pub fn min_header_len(&self) -> usize {
        self.counts.iter().map(|c| c.line + 1).max().unwrap_or(0)
    }

    /// Lay blocks out back to back after the header.
    ///
    /// `count_of` maps a count field name to its parsed value; fields the
    /// schema declares are always present by the time this is called. Fails
    /// with the name of the count field whose block would end past
    /// `usize::MAX`, so every returned `BlockRange::end` is representable.
    pub fn layout<F>(&self, count_of: F) -> Result<Vec<BlockRange>, &'static str>
    where
        F: Fn(&str) -> usize,
    {
        let mut cursor = self.header_lines;
        let mut ranges = Vec::with_capacity(self.blocks.len());
        for spec in &self.blocks {
            let len = count_of(spec.count_field);
            let start = cursor
                .checked_add(spec.leading_lines)
                .ok_or(spec.count_field)?;
            cursor = start.checked_add(len).ok_or(spec.count_field)?;
            ranges.push(BlockRange {
                spec: *spec,
                start,
                len,
            });
        }
        Ok(ranges)
    }
}
