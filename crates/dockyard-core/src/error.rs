//! Error types for dockyard-core

use thiserror::Error;

/// Result type alias using dockyard-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Dockyard
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid image name
    #[error("Invalid image name '{input}': {reason}")]
    InvalidImageName { input: String, reason: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid image name error
    pub fn invalid_image_name(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidImageName {
            input: input.into(),
            reason: reason.into(),
        }
    }
}
