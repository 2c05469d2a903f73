//! Stepwise construction of assessment queries
//!
//! The builder collects loosely-typed inputs (names, literals, raw rule
//! tuples) and turns them into an [`AssessmentQuery`] in a single
//! all-or-nothing [`AssessmentQueryBuilder::build`] call. Building does not
//! consume the builder, so settings can be tweaked and built again.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::benchmark::{BenchmarkSpec, DeltaFunction};
use crate::catalog::CubeCatalog;
use crate::clause::{build_gamma, build_sigma};
use crate::error::{AssessError, Result};
use crate::labeling::{LabelPartition, LabelingRule, parse_rules};
use crate::query::AssessmentQuery;

/// Benchmark as supplied by the caller, validated at build time
#[derive(Debug, Clone)]
enum BenchmarkInput {
    Spec(BenchmarkSpec),
    Details(Vec<String>),
}

/// Builder inputs in serializable form, e.g. an `[assessments.<name>]`
/// table of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub target_cube: String,
    #[serde(default)]
    pub selection: HashMap<String, String>,
    #[serde(default)]
    pub group_by: Vec<String>,
    pub aggregation: String,
    pub measurement: String,
    /// Loose benchmark details, kind first: `["past", "4"]`
    pub benchmark: Vec<String>,
    #[serde(default)]
    pub delta_functions: Vec<String>,
    /// Raw 5-element rule tuples
    #[serde(default)]
    pub labels: Vec<Vec<String>>,
}

/// Collects assessment settings and builds [`AssessmentQuery`] values
pub struct AssessmentQueryBuilder {
    catalog: Arc<dyn CubeCatalog>,
    target_cube: Option<String>,
    selection_predicates: HashMap<String, String>,
    group_by: HashSet<String>,
    aggregation_function: Option<String>,
    measurement: Option<String>,
    benchmark: Option<BenchmarkInput>,
    delta_functions: Vec<String>,
    labeling_rules: Vec<LabelingRule>,
}

impl AssessmentQueryBuilder {
    pub fn new(catalog: Arc<dyn CubeCatalog>) -> Self {
        Self {
            catalog,
            target_cube: None,
            selection_predicates: HashMap::new(),
            group_by: HashSet::new(),
            aggregation_function: None,
            measurement: None,
            benchmark: None,
            delta_functions: Vec::new(),
            labeling_rules: Vec::new(),
        }
    }

    /// Name of the cube to assess; matched case-insensitively
    pub fn target_cube(&mut self, name: impl Into<String>) -> &mut Self {
        self.target_cube = Some(name.into());
        self
    }

    /// Replace the selection predicates (level or dimension name to literal)
    pub fn selection_predicates<I, K, V>(&mut self, predicates: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.selection_predicates = predicates
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Replace the group-by set
    pub fn group_by<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn aggregation_function(&mut self, function: impl Into<String>) -> &mut Self {
        self.aggregation_function = Some(function.into());
        self
    }

    pub fn measurement(&mut self, measurement: impl Into<String>) -> &mut Self {
        self.measurement = Some(measurement.into());
        self
    }

    /// Use an already validated benchmark
    pub fn benchmark(&mut self, spec: BenchmarkSpec) -> &mut Self {
        self.benchmark = Some(BenchmarkInput::Spec(spec));
        self
    }

    /// Use a loose details list, kind first (`["Past", "4"]`)
    pub fn benchmark_details<I, S>(&mut self, details: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.benchmark = Some(BenchmarkInput::Details(
            details.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Delta function names, applied in the given order
    pub fn delta_functions<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.delta_functions = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn labeling_rules(&mut self, rules: Vec<LabelingRule>) -> &mut Self {
        self.labeling_rules = rules;
        self
    }

    /// Load every setting from a request, replacing current values
    pub fn apply_request(&mut self, request: &AssessmentRequest) -> Result<&mut Self> {
        let rules = parse_rules(&request.labels)?;

        self.target_cube(request.target_cube.as_str())
            .selection_predicates(request.selection.clone())
            .group_by(request.group_by.iter().cloned())
            .aggregation_function(request.aggregation.as_str())
            .measurement(request.measurement.as_str())
            .benchmark_details(request.benchmark.iter().cloned())
            .delta_functions(request.delta_functions.iter().cloned())
            .labeling_rules(rules);
        Ok(self)
    }

    /// Build the assessment query from the current settings.
    ///
    /// Either every step succeeds and a query is returned, or the first
    /// failure is returned and nothing is produced.
    #[instrument(name = "assess::build", skip(self))]
    pub fn build(&self) -> Result<AssessmentQuery> {
        let target = required(&self.target_cube, "target_cube")?;
        let aggregation = required(&self.aggregation_function, "aggregation_function")?;
        let measurement = required(&self.measurement, "measurement")?;
        let benchmark = self
            .benchmark
            .as_ref()
            .ok_or(AssessError::MissingField("benchmark"))?;
        if self.delta_functions.is_empty() {
            return Err(AssessError::MissingField("delta_functions"));
        }

        let target_cube_name = target.to_lowercase();
        let cube = self
            .catalog
            .cube_by_name(&target_cube_name)
            .ok_or_else(|| AssessError::CubeNotFound {
                name: target_cube_name.clone(),
            })?;
        debug!(cube = %target_cube_name, "Resolved target cube");

        let aggregation_function = aggregation.to_lowercase();

        let gamma = build_gamma(&cube, &self.group_by).map_err(|source| {
            AssessError::LevelResolutionFailed {
                name: source.resolve_error().name().to_string(),
                source,
            }
        })?;
        let sigma = build_sigma(
            &cube,
            self.selection_predicates
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
        )
        .map_err(|source| AssessError::LevelResolutionFailed {
            name: source.resolve_error().name().to_string(),
            source,
        })?;
        debug!(gamma = %gamma, sigma = %sigma, "Built clauses");

        let name = format!("{target_cube_name}_{measurement}");

        let benchmark = match benchmark {
            BenchmarkInput::Spec(spec) => spec.clone(),
            BenchmarkInput::Details(details) => BenchmarkSpec::from_details(details)?,
        };

        let delta_functions = self
            .delta_functions
            .iter()
            .map(|raw| {
                DeltaFunction::parse(raw).ok_or_else(|| AssessError::InvalidDeltaFunction {
                    name: raw.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let label_partition = LabelPartition::compile(&self.labeling_rules)?;

        debug!(query = %name, benchmark = %benchmark, "Built assessment query");
        Ok(AssessmentQuery {
            target_cube_name,
            name,
            aggregation_function,
            measurement: measurement.to_string(),
            gamma,
            sigma,
            benchmark,
            delta_functions,
            label_partition,
        })
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(AssessError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryCatalog;
    use crate::clause::ClauseError;
    use crate::labeling::{LabelingError, PartitionDefect};
    use crate::resolver::ResolveError;
    use crate::schema::{Cube, Dimension};

    fn catalog() -> Arc<dyn CubeCatalog> {
        let cube = Cube::new("sales")
            .with_dimension(Dimension::linear("date", ["date", "month", "year"]).unwrap())
            .unwrap()
            .with_dimension(Dimension::linear("store", ["store", "city", "country"]).unwrap())
            .unwrap();
        Arc::new([cube].into_iter().collect::<InMemoryCatalog>())
    }

    fn configured() -> AssessmentQueryBuilder {
        let mut builder = AssessmentQueryBuilder::new(catalog());
        builder
            .target_cube("Sales")
            .group_by(["city"])
            .selection_predicates([("year", "2019")])
            .aggregation_function("AVG")
            .measurement("storeCost")
            .benchmark_details(["past", "2"])
            .delta_functions(["difference"])
            .labeling_rules(vec![
                LabelingRule::new("(", "-inf", "0", ")", "down"),
                LabelingRule::new("[", "0", "inf", ")", "up"),
            ]);
        builder
    }

    #[test]
    fn test_build_normalizes_names() {
        let query = configured().build().unwrap();
        assert_eq!(query.target_cube_name(), "sales");
        assert_eq!(query.name(), "sales_storeCost");
        assert_eq!(query.aggregation_function(), "avg");
        assert_eq!(query.gamma().to_string(), "store.lvl1");
        assert_eq!(query.sigma().to_string(), "date.lvl2='2019'");
        assert_eq!(query.benchmark(), &BenchmarkSpec::PastPeriods { periods: 2 });
        assert_eq!(query.delta_functions(), &[DeltaFunction::Difference]);
    }

    #[test]
    fn test_builder_is_reusable() {
        let mut builder = configured();
        let first = builder.build().unwrap();
        builder.measurement("quantity");
        let second = builder.build().unwrap();
        assert_eq!(first.name(), "sales_storeCost");
        assert_eq!(second.name(), "sales_quantity");
        assert_eq!(builder.build().unwrap(), second);
    }

    #[test]
    fn test_missing_fields() {
        let builder = AssessmentQueryBuilder::new(catalog());
        assert!(matches!(
            builder.build(),
            Err(AssessError::MissingField("target_cube"))
        ));

        let mut builder = configured();
        builder.measurement("  ");
        assert!(matches!(
            builder.build(),
            Err(AssessError::MissingField("measurement"))
        ));

        let mut builder = configured();
        builder.delta_functions(Vec::<String>::new());
        assert!(matches!(
            builder.build(),
            Err(AssessError::MissingField("delta_functions"))
        ));
    }

    #[test]
    fn test_unknown_cube() {
        let mut builder = configured();
        builder.target_cube("None");
        match builder.build() {
            Err(AssessError::CubeNotFound { name }) => assert_eq!(name, "none"),
            other => panic!("Expected CubeNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_unresolvable_group_by() {
        let mut builder = configured();
        builder.group_by(["city", "week"]);
        match builder.build() {
            Err(AssessError::LevelResolutionFailed { name, source }) => {
                assert_eq!(name, "week");
                assert!(matches!(
                    source,
                    ClauseError::GroupBy(ResolveError::NotFound { .. })
                ));
            }
            other => panic!("Expected LevelResolutionFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_unresolvable_predicate() {
        let mut builder = configured();
        builder.selection_predicates([("Store", "SmartMart")]);
        assert!(matches!(
            builder.build(),
            Err(AssessError::LevelResolutionFailed {
                source: ClauseError::Selection(_),
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_benchmark() {
        let mut builder = configured();
        builder.benchmark_details(["past"]);
        assert!(matches!(
            builder.build(),
            Err(AssessError::InvalidBenchmarkSpec(_))
        ));

        builder.benchmark(BenchmarkSpec::Constant { value: 10.0 });
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_invalid_delta_function() {
        let mut builder = configured();
        builder.delta_functions(["ratio", "median"]);
        match builder.build() {
            Err(AssessError::InvalidDeltaFunction { name }) => assert_eq!(name, "median"),
            other => panic!("Expected InvalidDeltaFunction, got {other:?}"),
        }
    }

    #[test]
    fn test_labeling_failure_propagates_unchanged() {
        let mut builder = configured();
        builder.labeling_rules(vec![
            LabelingRule::new("[", "0", "10", "]", "a"),
            LabelingRule::new("[", "5", "15", "]", "b"),
        ]);
        match builder.build() {
            Err(AssessError::Labeling(LabelingError::InvalidPartition { defect, .. })) => {
                assert_eq!(defect, PartitionDefect::Overlap)
            }
            other => panic!("Expected Labeling error, got {other:?}"),
        }
    }

    #[test]
    fn test_apply_request() {
        let request = AssessmentRequest {
            target_cube: "SALES".into(),
            selection: [("store".to_string(), "SmartMart".to_string())].into(),
            group_by: vec!["month".into()],
            aggregation: "Sum".into(),
            measurement: "storeSales".into(),
            benchmark: vec!["Past".into(), "4".into()],
            delta_functions: vec!["ratio".into()],
            labels: vec![
                vec!["(".into(), "-inf".into(), "1".into(), ")".into(), "worse".into()],
                vec!["[".into(), "1".into(), "inf".into(), "]".into(), "better".into()],
            ],
        };

        let mut builder = AssessmentQueryBuilder::new(catalog());
        let query = builder.apply_request(&request).unwrap().build().unwrap();
        assert_eq!(
            query.target_cube_query(),
            "CubeName:sales\nName:sales_storeSales\nAggrFunc:sum\nMeasure:storeSales\n\
             Gamma:date.lvl1\nSigma:store.lvl0='SmartMart'"
        );
    }

    #[test]
    fn test_apply_request_rejects_malformed_rule() {
        let request = AssessmentRequest {
            labels: vec![vec!["(".into(), "-inf".into()]],
            ..Default::default()
        };
        let mut builder = AssessmentQueryBuilder::new(catalog());
        assert!(matches!(
            builder.apply_request(&request),
            Err(AssessError::Labeling(LabelingError::MalformedRule { rule: 0, found: 2 }))
        ));
    }
}
