//! Configuration model
//!
//! Parses configuration text; reading files is left to the host. A TOML
//! document can describe cube schemas (to seed an [`InMemoryCatalog`]),
//! named assessment requests, and logging preferences:
//!
//! ```toml
//! [logging]
//! filter = "assess_core=debug"
//! format = "json"
//!
//! [[cubes]]
//! name = "sales"
//!
//! [[cubes.dimensions]]
//! name = "date"
//! levels = ["date", "month", "year"]
//!
//! [assessments.monthly]
//! target_cube = "sales"
//! group_by = ["month"]
//! aggregation = "sum"
//! measurement = "storeSales"
//! benchmark = ["past", "4"]
//! delta_functions = ["ratio"]
//! labels = [["(", "-inf", "1", ")", "worse"], ["[", "1", "inf", "]", "better"]]
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::AssessmentRequest;
use crate::catalog::InMemoryCatalog;
use crate::schema::{Cube, Dimension, Hierarchy, SchemaError};

/// Errors from interpreting configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid schema for cube '{cube}': {source}")]
    Schema {
        cube: String,
        #[source]
        source: SchemaError,
    },

    #[error("Cube '{0}' is defined more than once")]
    DuplicateCube(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging preferences for hosts embedding the library
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; falls back to `RUST_LOG`, then `info`
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

/// A dimension as written in config.
///
/// `levels` is shorthand for a single linear hierarchy. When both `levels`
/// and `hierarchies` are given, `levels` becomes the first hierarchy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub levels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hierarchies: Vec<Vec<String>>,
}

impl DimensionDefinition {
    pub fn to_dimension(&self) -> Result<Dimension, SchemaError> {
        let mut hierarchies = Vec::with_capacity(self.hierarchies.len() + 1);
        if !self.levels.is_empty() {
            hierarchies.push(Hierarchy::linear(self.levels.iter().cloned())?);
        }
        for levels in &self.hierarchies {
            hierarchies.push(Hierarchy::linear(levels.iter().cloned())?);
        }
        Dimension::new(self.name.as_str(), hierarchies)
    }
}

/// A cube schema as written in config
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CubeDefinition {
    pub name: String,
    #[serde(default)]
    pub dimensions: Vec<DimensionDefinition>,
}

impl CubeDefinition {
    pub fn to_cube(&self) -> Result<Cube, SchemaError> {
        let mut cube = Cube::new(self.name.as_str());
        for dimension in &self.dimensions {
            cube.add_dimension(dimension.to_dimension()?)?;
        }
        Ok(cube)
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cubes: Vec<CubeDefinition>,
    #[serde(default)]
    pub assessments: BTreeMap<String, AssessmentRequest>,
}

impl AssessConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Build a catalog holding every configured cube
    pub fn catalog(&self) -> Result<InMemoryCatalog, ConfigError> {
        let mut catalog = InMemoryCatalog::new();
        for definition in &self.cubes {
            let cube = definition.to_cube().map_err(|source| ConfigError::Schema {
                cube: definition.name.clone(),
                source,
            })?;
            if catalog.insert(cube).is_some() {
                return Err(ConfigError::DuplicateCube(definition.name.to_lowercase()));
            }
        }
        Ok(catalog)
    }

    pub fn assessment(&self, name: &str) -> Option<&AssessmentRequest> {
        self.assessments.get(name)
    }
}
