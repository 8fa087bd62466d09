//! Equality and string operators
//!
//! `is` / `is-not` compare whole values; the rest are string predicates over
//! the match value. The regex operators run a pattern compiled once at
//! condition construction time.

use crate::condition::ConditionValue;
use crate::error::{ConditionError, Result};
use crate::operators::{match_str, plain_value, string_value, ConditionOperator};
use crate::types::{Value, ValueKind};

/// Equality against the stored value
#[derive(Debug, Clone, Copy)]
pub struct IsOperator;

impl ConditionOperator for IsOperator {
    fn operator_id(&self) -> &str {
        "is"
    }

    fn name(&self) -> &str {
        "Is"
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        Ok(match_value == plain_value(condition_value, self.operator_id())?)
    }
}

/// Inequality against the stored value
#[derive(Debug, Clone, Copy)]
pub struct IsNotOperator;

impl ConditionOperator for IsNotOperator {
    fn operator_id(&self) -> &str {
        "is-not"
    }

    fn name(&self) -> &str {
        "Is not"
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        Ok(match_value != plain_value(condition_value, self.operator_id())?)
    }
}

/// Substring test
#[derive(Debug, Clone, Copy)]
pub struct ContainsOperator;

impl ConditionOperator for ContainsOperator {
    fn operator_id(&self) -> &str {
        "contains"
    }

    fn name(&self) -> &str {
        "Contains"
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let needle = string_value(condition_value, self.operator_id())?;
        Ok(match_str(match_value, self.operator_id())?.contains(needle))
    }
}

/// Negated substring test
#[derive(Debug, Clone, Copy)]
pub struct DoesNotContainOperator;

impl ConditionOperator for DoesNotContainOperator {
    fn operator_id(&self) -> &str {
        "does-not-contain"
    }

    fn name(&self) -> &str {
        "Does not contain"
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let needle = string_value(condition_value, self.operator_id())?;
        Ok(!match_str(match_value, self.operator_id())?.contains(needle))
    }
}

/// String prefix test
#[derive(Debug, Clone, Copy)]
pub struct StartsWithOperator;

impl ConditionOperator for StartsWithOperator {
    fn operator_id(&self) -> &str {
        "starts-with"
    }

    fn name(&self) -> &str {
        "Starts with"
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let prefix = string_value(condition_value, self.operator_id())?;
        Ok(match_str(match_value, self.operator_id())?.starts_with(prefix))
    }
}

/// String suffix test
#[derive(Debug, Clone, Copy)]
pub struct EndsWithOperator;

impl ConditionOperator for EndsWithOperator {
    fn operator_id(&self) -> &str {
        "ends-with"
    }

    fn name(&self) -> &str {
        "Ends with"
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let suffix = string_value(condition_value, self.operator_id())?;
        Ok(match_str(match_value, self.operator_id())?.ends_with(suffix))
    }
}

/// Regex test over a string match value
#[derive(Debug, Clone, Copy)]
pub struct MatchesRegexOperator;

impl ConditionOperator for MatchesRegexOperator {
    fn operator_id(&self) -> &str {
        "matches-regex"
    }

    fn name(&self) -> &str {
        "Matches regex"
    }

    fn value_kind(&self) -> Option<ValueKind> {
        Some(ValueKind::Regex)
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let regex = compiled_regex(condition_value, self.operator_id())?;
        Ok(regex.is_match(match_str(match_value, self.operator_id())?))
    }
}

/// Negated regex test
#[derive(Debug, Clone, Copy)]
pub struct DoesNotMatchRegexOperator;

impl ConditionOperator for DoesNotMatchRegexOperator {
    fn operator_id(&self) -> &str {
        "does-not-match-regex"
    }

    fn name(&self) -> &str {
        "Does not match regex"
    }

    fn value_kind(&self) -> Option<ValueKind> {
        Some(ValueKind::Regex)
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let regex = compiled_regex(condition_value, self.operator_id())?;
        Ok(!regex.is_match(match_str(match_value, self.operator_id())?))
    }
}

fn compiled_regex<'a>(
    condition_value: &'a ConditionValue,
    operator_id: &str,
) -> Result<&'a regex::Regex> {
    match condition_value {
        ConditionValue::Regex { regex, .. } => Ok(regex),
        _ => Err(ConditionError::InvalidOperation(format!(
            "operator '{}' expected a compiled regex value",
            operator_id
        ))),
    }
}
