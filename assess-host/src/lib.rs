//! Host-side configuration loading.
//!
//! assess-core only interprets configuration text. This crate finds the
//! file on disk and hands its contents to [`AssessConfig::from_toml_str`].

use std::path::{Path, PathBuf};

use assess_core::{AssessConfig, ConfigError};
use thiserror::Error;
use tracing::debug;

/// Errors from loading a configuration file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from a specific path
    pub fn load(path: &Path) -> Result<AssessConfig, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = AssessConfig::from_toml_str(&contents).map_err(|source| {
            LoadError::Config {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), cubes = config.cubes.len(), "Loaded config");
        Ok(config)
    }

    /// Load the user config, or defaults when there is none
    pub fn load_default() -> Result<AssessConfig, LoadError> {
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(AssessConfig::default()),
        }
    }

    /// `<config dir>/assess/config.toml` on the current platform
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("assess").join("config.toml"))
    }
}
