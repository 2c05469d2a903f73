//! The assessment query artifact

use std::fmt;

use serde::Serialize;

use crate::benchmark::{BenchmarkSpec, DeltaFunction};
use crate::clause::{GammaClause, SigmaClause};
use crate::labeling::{LabelPartition, LabelingError};

/// A compiled assessment over a target cube.
///
/// Produced only by [`crate::AssessmentQueryBuilder::build`] and immutable
/// afterwards, so it can be shared freely between readers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentQuery {
    pub(crate) target_cube_name: String,
    pub(crate) name: String,
    pub(crate) aggregation_function: String,
    pub(crate) measurement: String,
    pub(crate) gamma: GammaClause,
    pub(crate) sigma: SigmaClause,
    pub(crate) benchmark: BenchmarkSpec,
    pub(crate) delta_functions: Vec<DeltaFunction>,
    pub(crate) label_partition: LabelPartition,
}

/// One delta function applied to a current/benchmark pair, with its label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub function: DeltaFunction,
    pub delta: f64,
    pub label: String,
}

impl AssessmentQuery {
    /// Lower-cased target cube name
    pub fn target_cube_name(&self) -> &str {
        &self.target_cube_name
    }

    /// `<cube>_<measurement>`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lower-cased aggregation function
    pub fn aggregation_function(&self) -> &str {
        &self.aggregation_function
    }

    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    pub fn gamma(&self) -> &GammaClause {
        &self.gamma
    }

    pub fn sigma(&self) -> &SigmaClause {
        &self.sigma
    }

    pub fn benchmark(&self) -> &BenchmarkSpec {
        &self.benchmark
    }

    pub fn delta_functions(&self) -> &[DeltaFunction] {
        &self.delta_functions
    }

    pub fn label_partition(&self) -> &LabelPartition {
        &self.label_partition
    }

    /// Canonical cube query text consumed by the execution layer.
    ///
    /// Six `key:value` lines in fixed order, no trailing newline.
    pub fn target_cube_query(&self) -> String {
        format!(
            "CubeName:{}\nName:{}\nAggrFunc:{}\nMeasure:{}\nGamma:{}\nSigma:{}",
            self.target_cube_name,
            self.name,
            self.aggregation_function,
            self.measurement,
            self.gamma,
            self.sigma,
        )
    }

    /// Label a delta value computed by the execution layer
    pub fn label(&self, delta: f64) -> Result<&str, LabelingError> {
        self.label_partition.classify(delta)
    }

    /// Apply every delta function, in order, and label each result
    pub fn assess(&self, current: f64, benchmark: f64) -> Result<Vec<Assessment>, LabelingError> {
        self.delta_functions
            .iter()
            .map(|function| {
                let delta = function.apply(current, benchmark);
                let label = self.label(delta)?.to_string();
                Ok(Assessment {
                    function: *function,
                    delta,
                    label,
                })
            })
            .collect()
    }
}

impl fmt::Display for AssessmentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target_cube_query())
    }
}
