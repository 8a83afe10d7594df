//! Error types for the navigator's fallible edges
//!
//! Interactive operations on a running navigator never fail (they degrade to
//! no-ops or empty results). Only loading a configuration or a dataset from
//! text or disk can fail, and those failures are reported here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the navigator crate
#[derive(Error, Debug)]
pub enum NavigatorError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config value for {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

/// Dataset decoding errors
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid dataset YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, NavigatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "journey.tick_interval_ms",
            message: "must be greater than zero".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("journey.tick_interval_ms"));
        assert!(msg.contains("greater than zero"));
    }

    #[test]
    fn test_navigator_error_from_config() {
        let err: NavigatorError = ConfigError::InvalidValue {
            field: "layout.radius",
            message: "negative".to_string(),
        }
        .into();
        assert!(matches!(err, NavigatorError::Config(_)));
    }
}
