//! Error types
//!
//! Configuration assembly itself never fails: coercion problems are logged and
//! the declared default is kept. The errors here cover the edges around
//! assembly (registry lookups by name, logging bootstrap, snapshots).

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A domain name that the registry does not know about
    #[error("Unknown configuration domain: {0}")]
    UnknownDomain(String),

    /// Logging bootstrap errors
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// An override string that could not be coerced into the setting's type
///
/// Produced by [`FromOverride`](crate::config::FromOverride) implementations.
/// The resolver logs it and falls back to the default, so it is never
/// returned from domain assembly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot coerce '{value}' into {target}")]
pub struct CoercionError {
    /// The rejected override value
    pub value: String,

    /// Human-readable name of the target type
    pub target: &'static str,
}

impl CoercionError {
    /// Creates a new coercion error
    pub fn new(value: impl Into<String>, target: &'static str) -> Self {
        Self {
            value: value.into(),
            target,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, ConfigError>;
