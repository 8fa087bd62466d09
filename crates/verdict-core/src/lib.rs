//! Verdict Core - Condition matching engine
//!
//! This crate provides the generic building blocks for rule-based matching:
//! - Value types for match values and stored condition values
//! - Operators (named predicates over a match value and a stored value)
//! - Choices (typed accessors that derive match values from a context)
//! - Conditions and condition sets with ALL/ANY combination semantics
//! - Serialization of condition sets to/from a plain data form
//! - An ordered, pluggable registry of choices

pub mod choice;
pub mod condition;
pub mod error;
pub mod operators;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use choice::{ConditionChoice, Lookup, MatchMode, MatchState};
pub use condition::{
    Condition, ConditionSet, ConditionSetMode, ConditionValue, SerializedCondition,
    SerializedConditionSet,
};
pub use error::{ConditionError, Result};
pub use operators::{ConditionOperator, OperatorSet};
pub use registry::ConditionChoices;
pub use types::{Value, ValueKind};
