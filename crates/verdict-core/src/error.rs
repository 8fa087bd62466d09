//! Error types for Verdict Core

use thiserror::Error;

/// Condition engine error type
#[derive(Error, Debug)]
pub enum ConditionError {
    /// A choice id could not be resolved against the registry
    #[error("Unknown condition choice: {choice_id}")]
    UnknownChoice { choice_id: String },

    /// An operator id could not be resolved within a choice's operator set
    #[error("Unknown operator '{operator_id}' for choice '{choice_id}'")]
    UnknownOperator {
        choice_id: String,
        operator_id: String,
    },

    /// A choice with this id is already registered
    #[error("Condition choice already registered: {choice_id}")]
    DuplicateChoice { choice_id: String },

    /// An operator with this id is already in the set
    #[error("Operator already registered: {operator_id}")]
    DuplicateOperator { operator_id: String },

    /// The operator takes a stored value but none was given
    #[error("Operator '{operator_id}' requires a condition value")]
    MissingConditionValue { operator_id: String },

    /// The operator takes no stored value but one was given
    #[error("Operator '{operator_id}' does not take a condition value")]
    UnexpectedConditionValue { operator_id: String },

    /// The stored value does not match the expected shape
    #[error("Invalid condition value: expected {expected}, got {actual}")]
    InvalidConditionValue {
        expected: &'static str,
        actual: String,
    },

    /// A regex condition value failed to compile
    #[error("Invalid regex pattern '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },

    /// An operator was applied to an incompatible match value
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A choice failed to derive its match value from the context
    #[error("Failed to derive match value: {0}")]
    MatchValue(String),

    /// A queryable choice failed to enumerate its valid values
    #[error("Value lookup failed: {0}")]
    ValueLookup(String),
}

/// Result type for condition engine operations
pub type Result<T> = std::result::Result<T, ConditionError>;
