//! Labeling engine errors

use std::fmt;

use thiserror::Error;

/// Why a rule list does not form a valid partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionDefect {
    /// No rules were supplied
    Empty,
    /// A single rule denotes an empty set (e.g. `(5, 5]` or `[7, 3]`)
    EmptyInterval,
    /// Two intervals share at least one point
    Overlap,
    /// Some point between two intervals is covered by neither
    Gap,
    /// The intervals do not reach `-inf` on the left or `inf` on the right
    NotTotal,
}

impl PartitionDefect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "no rules",
            Self::EmptyInterval => "empty interval",
            Self::Overlap => "overlapping intervals",
            Self::Gap => "gap between intervals",
            Self::NotTotal => "does not cover -inf..inf",
        }
    }
}

impl fmt::Display for PartitionDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from compiling labeling rules or classifying values.
///
/// `rule` is the zero-based position of the offending rule in the input list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LabelingError {
    #[error("Rule {rule}: expected 5 fields, found {found}")]
    MalformedRule { rule: usize, found: usize },

    #[error("Rule {rule}: invalid bound '{bound}'")]
    InvalidBound { rule: usize, bound: String },

    #[error("Rule {rule}: invalid bracket '{bracket}'")]
    InvalidBracket { rule: usize, bracket: String },

    #[error("Rule {rule}: invalid partition ({defect})")]
    InvalidPartition { rule: usize, defect: PartitionDefect },

    #[error("Value {value} is outside every labeled interval")]
    OutOfRange { value: f64 },
}
