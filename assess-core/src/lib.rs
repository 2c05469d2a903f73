//! assess-core: Assessment query compiler for multidimensional cubes
//!
//! This crate turns a loosely specified assessment ("sum of storeSales per
//! month and store, against the past 4 periods, labeled by ratio") into:
//!
//! - **Canonical cube query** - [`AssessmentQuery::target_cube_query`] with
//!   sorted, fully resolved Gamma (group-by) and Sigma (selection) clauses
//! - **Labeling engine** - [`LabelPartition`] classifying a computed delta
//!   into a label using bracket-style interval rules
//!
//! Cube storage, benchmark computation and query execution live elsewhere;
//! the [`CubeCatalog`] trait is the only seam to the outside.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use assess_core::{AssessmentQueryBuilder, Cube, Dimension, InMemoryCatalog, LabelingRule};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let sales = Cube::new("sales")
//!         .with_dimension(Dimension::linear("date", ["date", "month", "year"])?)?
//!         .with_dimension(Dimension::linear("store", ["store", "city", "country"])?)?;
//!     let catalog: InMemoryCatalog = [sales].into_iter().collect();
//!
//!     let mut builder = AssessmentQueryBuilder::new(Arc::new(catalog));
//!     builder
//!         .target_cube("Sales")
//!         .group_by(["month", "store"])
//!         .selection_predicates([("month", "07/2019")])
//!         .aggregation_function("Sum")
//!         .measurement("storeSales")
//!         .benchmark_details(["past", "4"])
//!         .delta_functions(["ratio"])
//!         .labeling_rules(vec![
//!             LabelingRule::new("[", "-inf", "0.9", ")", "worse"),
//!             LabelingRule::new("[", "0.9", "1.1", "]", "fine"),
//!             LabelingRule::new("(", "1.1", "inf", "]", "better"),
//!         ]);
//!
//!     let query = builder.build()?;
//!     assert_eq!(query.gamma().to_string(), "date.lvl1,store.lvl0");
//!     assert_eq!(query.label(1.0)?, "fine");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Architecture
//!
//! ```text
//! builder inputs ──► resolver (via clause) ──► Gamma / Sigma ──┐
//!                                                              ├──► AssessmentQuery
//! rule tuples ─────► labeling ──► LabelPartition ──────────────┘
//! ```

pub mod benchmark;
pub mod builder;
pub mod catalog;
pub mod clause;
pub mod config;
pub mod error;
pub mod labeling;
pub mod query;
pub mod resolver;
pub mod schema;

// Re-export key types for convenience
pub use benchmark::{BenchmarkError, BenchmarkSpec, DeltaFunction};
pub use builder::{AssessmentQueryBuilder, AssessmentRequest};
pub use catalog::{CubeCatalog, InMemoryCatalog};
pub use clause::{
    ClauseError, GammaClause, SelectionPredicate, SigmaClause, build_gamma, build_sigma,
};
pub use config::{
    AssessConfig, ConfigError, CubeDefinition, DimensionDefinition, LogFormat, LoggingConfig,
};
pub use error::{AssessError, Result};
pub use labeling::{Interval, LabelPartition, LabelingError, LabelingRule, PartitionDefect};
pub use query::{Assessment, AssessmentQuery};
pub use resolver::{ResolveError, resolve_level};
pub use schema::{CanonicalLevelRef, Cube, Dimension, Hierarchy, Level, SchemaError};
