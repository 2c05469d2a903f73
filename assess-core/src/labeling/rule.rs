//! Raw labeling rules and bound parsing

use serde::{Deserialize, Serialize};

use super::LabelingError;

/// A raw interval rule: `(left, lower, upper, right, label)`.
///
/// `left` is `(` or `[`, `right` is `)` or `]`. Bounds are decimal literals
/// or the sentinels `-inf` / `inf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelingRule {
    pub left: String,
    pub lower: String,
    pub upper: String,
    pub right: String,
    pub label: String,
}

impl LabelingRule {
    pub fn new(
        left: impl Into<String>,
        lower: impl Into<String>,
        upper: impl Into<String>,
        right: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            lower: lower.into(),
            upper: upper.into(),
            right: right.into(),
            label: label.into(),
        }
    }

    /// Build a rule from a 5-element tuple; `None` on any other arity
    pub fn from_tuple<S: AsRef<str>>(parts: &[S]) -> Option<Self> {
        match parts {
            [left, lower, upper, right, label] => Some(Self::new(
                left.as_ref(),
                lower.as_ref(),
                upper.as_ref(),
                right.as_ref(),
                label.as_ref(),
            )),
            _ => None,
        }
    }
}

/// Convert a list of raw 5-element tuples into rules.
pub fn parse_rules<T, S>(tuples: &[T]) -> Result<Vec<LabelingRule>, LabelingError>
where
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    tuples
        .iter()
        .enumerate()
        .map(|(rule, tuple)| {
            let parts = tuple.as_ref();
            LabelingRule::from_tuple(parts).ok_or(LabelingError::MalformedRule {
                rule,
                found: parts.len(),
            })
        })
        .collect()
}

/// Parse a bound literal. Only `-inf`, `inf` and `+inf` produce infinities;
/// any other non-finite spelling (`nan`, `infinity`) is rejected.
pub(crate) fn parse_bound(rule: usize, text: &str) -> Result<f64, LabelingError> {
    match text.trim() {
        "-inf" => Ok(f64::NEG_INFINITY),
        "inf" | "+inf" => Ok(f64::INFINITY),
        literal => literal
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            // -0 and 0 are the same boundary
            .map(|value| value + 0.0)
            .ok_or_else(|| LabelingError::InvalidBound {
                rule,
                bound: text.to_string(),
            }),
    }
}

/// `true` for an inclusive bracket
pub(crate) fn parse_left(rule: usize, text: &str) -> Result<bool, LabelingError> {
    match text.trim() {
        "[" => Ok(true),
        "(" => Ok(false),
        _ => Err(LabelingError::InvalidBracket {
            rule,
            bracket: text.to_string(),
        }),
    }
}

/// `true` for an inclusive bracket
pub(crate) fn parse_right(rule: usize, text: &str) -> Result<bool, LabelingError> {
    match text.trim() {
        "]" => Ok(true),
        ")" => Ok(false),
        _ => Err(LabelingError::InvalidBracket {
            rule,
            bracket: text.to_string(),
        }),
    }
}
