//! Benchmark specifications and delta functions
//!
//! Benchmark *computation* happens in the execution layer. Here we only
//! check that a benchmark is well formed, and name the functions used to
//! compare a measurement with its benchmark.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Errors from validating benchmark details
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BenchmarkError {
    #[error("Benchmark details are empty")]
    Missing,

    #[error("Unknown benchmark kind '{0}'")]
    UnknownKind(String),

    #[error("Benchmark '{kind}' takes {expected} parameter(s), found {found}")]
    Arity {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid parameter '{value}' for benchmark '{kind}'")]
    InvalidParameter { kind: &'static str, value: String },
}

/// What a measurement is compared against
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum BenchmarkSpec {
    /// The same measurement over the previous `periods` periods
    #[serde(rename = "past-n-periods")]
    PastPeriods { periods: u32 },

    /// The same measurement for a sibling member at `level`
    #[serde(rename = "sibling")]
    Sibling { level: String, member: String },

    /// A fixed reference value
    #[serde(rename = "constant")]
    Constant { value: f64 },
}

impl BenchmarkSpec {
    pub const PAST_N_PERIODS: &'static str = "past-n-periods";
    pub const SIBLING: &'static str = "sibling";
    pub const CONSTANT: &'static str = "constant";

    /// Validate a benchmark kind and its parameters.
    ///
    /// Kinds match case-insensitively; `past` is accepted for `past-n-periods`.
    pub fn parse<S: AsRef<str>>(kind: &str, params: &[S]) -> Result<Self, BenchmarkError> {
        match kind.trim().to_lowercase().as_str() {
            "past" | Self::PAST_N_PERIODS => {
                let [periods] = expect_arity::<_, 1>(Self::PAST_N_PERIODS, params)?;
                let periods = periods
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| BenchmarkError::InvalidParameter {
                        kind: Self::PAST_N_PERIODS,
                        value: periods.to_string(),
                    })?;
                Ok(Self::PastPeriods { periods })
            }
            Self::SIBLING => {
                let [level, member] = expect_arity::<_, 2>(Self::SIBLING, params)?;
                if level.trim().is_empty() {
                    return Err(BenchmarkError::InvalidParameter {
                        kind: Self::SIBLING,
                        value: level.to_string(),
                    });
                }
                Ok(Self::Sibling {
                    level: level.trim().to_string(),
                    member: member.to_string(),
                })
            }
            Self::CONSTANT => {
                let [value] = expect_arity::<_, 1>(Self::CONSTANT, params)?;
                let value = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| BenchmarkError::InvalidParameter {
                        kind: Self::CONSTANT,
                        value: value.to_string(),
                    })?;
                Ok(Self::Constant { value })
            }
            _ => Err(BenchmarkError::UnknownKind(kind.to_string())),
        }
    }

    /// Parse a loose details list whose first element is the kind,
    /// e.g. `["Past", "4"]`.
    pub fn from_details<S: AsRef<str>>(details: &[S]) -> Result<Self, BenchmarkError> {
        let (kind, params) = details.split_first().ok_or(BenchmarkError::Missing)?;
        Self::parse(kind.as_ref(), params)
    }

    /// Canonical kind name
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PastPeriods { .. } => Self::PAST_N_PERIODS,
            Self::Sibling { .. } => Self::SIBLING,
            Self::Constant { .. } => Self::CONSTANT,
        }
    }

    /// Parameters in declaration order, rendered as strings
    pub fn parameters(&self) -> Vec<String> {
        match self {
            Self::PastPeriods { periods } => vec![periods.to_string()],
            Self::Sibling { level, member } => vec![level.clone(), member.clone()],
            Self::Constant { value } => vec![value.to_string()],
        }
    }
}

impl fmt::Display for BenchmarkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.parameters().join(", "))
    }
}

fn expect_arity<'a, S: AsRef<str>, const N: usize>(
    kind: &'static str,
    params: &'a [S],
) -> Result<[&'a str; N], BenchmarkError> {
    if params.len() != N {
        return Err(BenchmarkError::Arity {
            kind,
            expected: N,
            found: params.len(),
        });
    }
    Ok(std::array::from_fn(|i| params[i].as_ref()))
}

/// Combines a current value with its benchmark into a comparison metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeltaFunction {
    /// `current / benchmark`
    Ratio,
    /// `current - benchmark`
    Difference,
    /// `(current - benchmark) / benchmark * 100`
    PercentChange,
}

impl DeltaFunction {
    /// Parse a function name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ratio" => Some(Self::Ratio),
            "difference" | "diff" => Some(Self::Difference),
            "percent-change" | "percentage" => Some(Self::PercentChange),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ratio => "ratio",
            Self::Difference => "difference",
            Self::PercentChange => "percent-change",
        }
    }

    /// Apply the function with IEEE semantics: a zero benchmark yields an
    /// infinity or NaN rather than an error.
    pub fn apply(&self, current: f64, benchmark: f64) -> f64 {
        match self {
            Self::Ratio => current / benchmark,
            Self::Difference => current - benchmark,
            Self::PercentChange => (current - benchmark) / benchmark * 100.0,
        }
    }
}

impl fmt::Display for DeltaFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
