//! Error types for assess-core

use thiserror::Error;

use crate::benchmark::BenchmarkError;
use crate::clause::ClauseError;
use crate::config::ConfigError;
use crate::labeling::LabelingError;

/// Top-level error type for building assessment queries
#[derive(Error, Debug)]
pub enum AssessError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Cube not found: {name}")]
    CubeNotFound { name: String },

    #[error("Level resolution failed for '{name}': {source}")]
    LevelResolutionFailed {
        name: String,
        #[source]
        source: ClauseError,
    },

    #[error("Invalid benchmark spec: {0}")]
    InvalidBenchmarkSpec(#[from] BenchmarkError),

    #[error("Unknown delta function '{name}'")]
    InvalidDeltaFunction { name: String },

    #[error(transparent)]
    Labeling(#[from] LabelingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for assess-core operations
pub type Result<T> = std::result::Result<T, AssessError>;
