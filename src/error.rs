//! Error types for configuration loading and validation

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid cadence: {0}")]
    InvalidCadence(String),

    #[error("Invalid initial length: {0}")]
    InvalidLength(usize),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
