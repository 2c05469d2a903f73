//! Logging bootstrap for hosts embedding assess-core.
//!
//! The library itself only emits `tracing` events; installing a subscriber
//! is left to the host. This crate wires a [`LoggingConfig`] onto a
//! `tracing_subscriber::fmt` subscriber with an `EnvFilter`.

use assess_core::{LogFormat, LoggingConfig};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Filter used when neither the config nor `RUST_LOG` provide one
pub const DEFAULT_FILTER: &str = "info";

/// Errors from installing the global subscriber
#[derive(Error, Debug)]
pub enum ObserveError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

/// Resolve the filter: explicit config first, then `RUST_LOG`, then `info`
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, ObserveError> {
    match config.filter.as_deref() {
        Some(directives) => Ok(EnvFilter::try_new(directives)?),
        None => {
            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
            Ok(filter)
        }
    }
}

/// Install the global subscriber, writing to stderr
pub fn init_logging(config: &LoggingConfig) -> Result<(), ObserveError> {
    init_logging_with_writer(config, std::io::stderr)
}

/// Install the global subscriber with a custom writer
pub fn init_logging_with_writer<W>(config: &LoggingConfig, writer: W) -> Result<(), ObserveError>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| ObserveError::Install(e.to_string()))
}
