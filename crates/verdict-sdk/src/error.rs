//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Stored configuration data was malformed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Condition engine error
    #[error("Condition error: {0}")]
    Condition(#[from] verdict_core::ConditionError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file could not be parsed
    #[error("Invalid config file {path}: {message}")]
    InvalidConfigFile { path: String, message: String },

    /// Two loaded configs share a name
    #[error("Duplicate automation config: {0}")]
    DuplicateConfig(String),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
