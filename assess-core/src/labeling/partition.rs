//! Compiled label partitions

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::trace;

use super::rule::{parse_bound, parse_left, parse_right};
use super::{LabelingError, LabelingRule, PartitionDefect};

/// A labeled interval of the extended real line.
///
/// Infinite endpoints are always closed, so `-inf` and `inf` themselves
/// belong to the outermost intervals whatever bracket the rule used.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    lower: f64,
    upper: f64,
    lower_inclusive: bool,
    upper_inclusive: bool,
    label: String,
    rule: usize,
}

impl Interval {
    fn parse(rule: usize, raw: &LabelingRule) -> Result<Self, LabelingError> {
        let lower_inclusive = parse_left(rule, &raw.left)?;
        let lower = parse_bound(rule, &raw.lower)?;
        let upper = parse_bound(rule, &raw.upper)?;
        let upper_inclusive = parse_right(rule, &raw.right)?;

        let interval = Self {
            lower,
            upper,
            lower_inclusive: lower_inclusive || lower == f64::NEG_INFINITY,
            upper_inclusive: upper_inclusive || upper == f64::INFINITY,
            label: raw.label.clone(),
            rule,
        };

        let empty = match lower.total_cmp(&upper) {
            Ordering::Greater => true,
            Ordering::Equal => {
                !(lower.is_finite() && interval.lower_inclusive && interval.upper_inclusive)
            }
            Ordering::Less => false,
        };
        if empty {
            return Err(LabelingError::InvalidPartition {
                rule,
                defect: PartitionDefect::EmptyInterval,
            });
        }

        Ok(interval)
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn lower_inclusive(&self) -> bool {
        self.lower_inclusive
    }

    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Position of the source rule in the compiled rule list
    pub fn rule(&self) -> usize {
        self.rule
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_lower = value > self.lower || (value == self.lower && self.lower_inclusive);
        let below_upper = value < self.upper || (value == self.upper && self.upper_inclusive);
        above_lower && below_upper
    }

    /// `true` when every point of the interval lies strictly below `value`
    fn ends_before(&self, value: f64) -> bool {
        self.upper < value || (self.upper == value && !self.upper_inclusive)
    }

    fn to_rule(&self) -> LabelingRule {
        LabelingRule::new(
            if self.lower_inclusive { "[" } else { "(" },
            format_bound(self.lower),
            format_bound(self.upper),
            if self.upper_inclusive { "]" } else { ")" },
            self.label.clone(),
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = self.to_rule();
        write!(
            f,
            "{}{}, {}{}: {}",
            rule.left, rule.lower, rule.upper, rule.right, rule.label
        )
    }
}

fn format_bound(value: f64) -> String {
    format!("{value:?}")
}

/// A validated, ordered covering of `-inf..inf` by labeled intervals.
///
/// Built once by [`LabelPartition::compile`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPartition {
    intervals: Vec<Interval>,
}

impl LabelPartition {
    /// Validate `rules` and compile them into a partition.
    ///
    /// Rules may be given in any order; they are sorted by lower bound. After
    /// sorting, each interval must end exactly where the next begins, with
    /// exactly one side of the shared bound inclusive, and the whole list
    /// must span `-inf..inf`.
    pub fn compile(rules: &[LabelingRule]) -> Result<Self, LabelingError> {
        if rules.is_empty() {
            return Err(LabelingError::InvalidPartition {
                rule: 0,
                defect: PartitionDefect::Empty,
            });
        }

        let mut intervals = rules
            .iter()
            .enumerate()
            .map(|(rule, raw)| Interval::parse(rule, raw))
            .collect::<Result<Vec<_>, _>>()?;

        // Inclusive lower bounds sort ahead of exclusive ones at the same point
        intervals.sort_by(|a, b| {
            a.lower
                .total_cmp(&b.lower)
                .then_with(|| b.lower_inclusive.cmp(&a.lower_inclusive))
        });

        for pair in intervals.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            let defect = match current.upper.total_cmp(&next.lower) {
                Ordering::Less => Some(PartitionDefect::Gap),
                Ordering::Greater => Some(PartitionDefect::Overlap),
                Ordering::Equal => match (current.upper_inclusive, next.lower_inclusive) {
                    (true, true) => Some(PartitionDefect::Overlap),
                    (false, false) => Some(PartitionDefect::Gap),
                    _ => None,
                },
            };
            if let Some(defect) = defect {
                return Err(LabelingError::InvalidPartition {
                    rule: next.rule,
                    defect,
                });
            }
        }

        let first = &intervals[0];
        let last = &intervals[intervals.len() - 1];
        if first.lower != f64::NEG_INFINITY {
            return Err(LabelingError::InvalidPartition {
                rule: first.rule,
                defect: PartitionDefect::NotTotal,
            });
        }
        if last.upper != f64::INFINITY {
            return Err(LabelingError::InvalidPartition {
                rule: last.rule,
                defect: PartitionDefect::NotTotal,
            });
        }

        trace!(intervals = intervals.len(), "Compiled label partition");
        Ok(Self { intervals })
    }

    /// Label of the interval containing `value`.
    ///
    /// Compilation guarantees every point of the extended real line falls in
    /// exactly one interval, so the only input that yields
    /// [`LabelingError::OutOfRange`] is NaN.
    pub fn classify(&self, value: f64) -> Result<&str, LabelingError> {
        if value.is_nan() {
            return Err(LabelingError::OutOfRange { value });
        }

        let index = self
            .intervals
            .partition_point(|interval| interval.ends_before(value));

        match self.intervals.get(index) {
            Some(interval) => {
                debug_assert!(interval.contains(value));
                Ok(&interval.label)
            }
            None => Err(LabelingError::OutOfRange { value }),
        }
    }

    /// Intervals in ascending order
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Labels in interval order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.intervals.iter().map(Interval::label)
    }

    /// Normalized rules, one per interval in ascending order
    pub fn rules(&self) -> Vec<LabelingRule> {
        self.intervals.iter().map(Interval::to_rule).collect()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl Serialize for LabelPartition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rules().serialize(serializer)
    }
}
