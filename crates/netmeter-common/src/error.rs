//! Error types for netmeter
//!
//! Provides a unified error type and the registry-specific error variants

use thiserror::Error;

/// Result type alias using MeterError
pub type Result<T> = std::result::Result<T, MeterError>;

/// Unified error type for netmeter operations
#[derive(Debug, Error)]
pub enum MeterError {
    // Notification content errors
    #[error("Missing required field `{field}` in {event_type} notification")]
    MissingField { field: String, event_type: String },

    #[error("Invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },

    // Descriptor registration errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MeterError {
    pub fn missing_field(field: impl Into<String>, event_type: impl Into<String>) -> Self {
        MeterError::MissingField {
            field: field.into(),
            event_type: event_type.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MeterError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Descriptor registry errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Invalid resource name `{0}`")]
    InvalidResourceName(String),

    #[error("Invalid interest pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Resource `{0}` is already registered")]
    DuplicateResource(String),

    #[error("Resource `{0}` declares no interest patterns")]
    NoPatterns(String),
}

impl From<serde_json::Error> for MeterError {
    fn from(err: serde_json::Error) -> Self {
        MeterError::Serialization(err.to_string())
    }
}
