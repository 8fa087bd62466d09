//! Presence operators
//!
//! These operators take no stored value; they only look at whether the match
//! value is empty (null, empty string, empty array or empty object).

use crate::condition::ConditionValue;
use crate::error::Result;
use crate::operators::ConditionOperator;
use crate::types::Value;

/// True iff the match value is empty or absent
#[derive(Debug, Clone, Copy)]
pub struct UnsetOperator;

impl ConditionOperator for UnsetOperator {
    fn operator_id(&self) -> &str {
        "unset"
    }

    fn name(&self) -> &str {
        "Is unset"
    }

    fn requires_value(&self) -> bool {
        false
    }

    fn matches(&self, match_value: &Value, _condition_value: &ConditionValue) -> Result<bool> {
        Ok(match_value.is_empty())
    }
}

/// True iff the match value is non-empty
#[derive(Debug, Clone, Copy)]
pub struct AnySetOperator;

impl ConditionOperator for AnySetOperator {
    fn operator_id(&self) -> &str {
        "any"
    }

    fn name(&self) -> &str {
        "Has a value"
    }

    fn requires_value(&self) -> bool {
        false
    }

    fn matches(&self, match_value: &Value, _condition_value: &ConditionValue) -> Result<bool> {
        Ok(!match_value.is_empty())
    }
}
