//! Membership operators
//!
//! `one-of` / `not-one-of` test a scalar match value against a stored list,
//! for model-reference or enum choices. `contains-any` /
//! `does-not-contain-any` run a set-intersection test between a list-valued
//! match value and a stored list.

use crate::condition::ConditionValue;
use crate::error::{ConditionError, Result};
use crate::operators::{list_value, ConditionOperator};
use crate::types::{Value, ValueKind};

/// True iff the match value appears in the stored list
#[derive(Debug, Clone, Copy)]
pub struct OneOfOperator;

impl ConditionOperator for OneOfOperator {
    fn operator_id(&self) -> &str {
        "one-of"
    }

    fn name(&self) -> &str {
        "Is one of"
    }

    fn value_kind(&self) -> Option<ValueKind> {
        Some(ValueKind::StringList)
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let choices = list_value(condition_value, self.operator_id())?;
        Ok(choices.contains(match_value))
    }
}

/// True iff the match value does not appear in the stored list
#[derive(Debug, Clone, Copy)]
pub struct NotOneOfOperator;

impl ConditionOperator for NotOneOfOperator {
    fn operator_id(&self) -> &str {
        "not-one-of"
    }

    fn name(&self) -> &str {
        "Is not one of"
    }

    fn value_kind(&self) -> Option<ValueKind> {
        Some(ValueKind::StringList)
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let choices = list_value(condition_value, self.operator_id())?;
        Ok(!choices.contains(match_value))
    }
}

/// True iff the list match value and the stored list intersect
#[derive(Debug, Clone, Copy)]
pub struct ContainsAnyOperator;

impl ConditionOperator for ContainsAnyOperator {
    fn operator_id(&self) -> &str {
        "contains-any"
    }

    fn name(&self) -> &str {
        "Contains any"
    }

    fn value_kind(&self) -> Option<ValueKind> {
        Some(ValueKind::StringList)
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let choices = list_value(condition_value, self.operator_id())?;
        let items = match_list(match_value, self.operator_id())?;
        Ok(items.iter().any(|item| choices.contains(item)))
    }
}

/// True iff the list match value and the stored list do not intersect
#[derive(Debug, Clone, Copy)]
pub struct DoesNotContainAnyOperator;

impl ConditionOperator for DoesNotContainAnyOperator {
    fn operator_id(&self) -> &str {
        "does-not-contain-any"
    }

    fn name(&self) -> &str {
        "Does not contain any"
    }

    fn value_kind(&self) -> Option<ValueKind> {
        Some(ValueKind::StringList)
    }

    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool> {
        let choices = list_value(condition_value, self.operator_id())?;
        let items = match_list(match_value, self.operator_id())?;
        Ok(!items.iter().any(|item| choices.contains(item)))
    }
}

fn match_list<'a>(match_value: &'a Value, operator_id: &str) -> Result<&'a [Value]> {
    match_value.as_array().ok_or_else(|| {
        ConditionError::InvalidOperation(format!(
            "operator '{}' requires a list match value, got {}",
            operator_id,
            match_value.type_name()
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(names: &[&str]) -> ConditionValue {
        ConditionValue::Plain(Value::from(
            names.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        ))
    }

    #[test]
    fn test_one_of() {
        let op = OneOfOperator;
        let value = stored(&["alice", "bob"]);

        assert!(op.matches(&Value::String("alice".into()), &value).unwrap());
        assert!(!op.matches(&Value::String("carol".into()), &value).unwrap());
    }

    #[test]
    fn test_not_one_of() {
        let op = NotOneOfOperator;
        let value = stored(&["alice", "bob"]);

        assert!(!op.matches(&Value::String("alice".into()), &value).unwrap());
        assert!(op.matches(&Value::String("carol".into()), &value).unwrap());
    }

    #[test]
    fn test_contains_any() {
        let op = ContainsAnyOperator;
        let value = stored(&["security", "release"]);

        let groups = Value::from(vec!["docs".to_string(), "security".to_string()]);
        assert!(op.matches(&groups, &value).unwrap());

        let groups = Value::from(vec!["docs".to_string()]);
        assert!(!op.matches(&groups, &value).unwrap());

        // Empty match list intersects nothing
        assert!(!op.matches(&Value::Array(Vec::new()), &value).unwrap());
    }

    #[test]
    fn test_does_not_contain_any() {
        let op = DoesNotContainAnyOperator;
        let value = stored(&["security"]);

        let groups = Value::from(vec!["docs".to_string()]);
        assert!(op.matches(&groups, &value).unwrap());

        let groups = Value::from(vec!["security".to_string()]);
        assert!(!op.matches(&groups, &value).unwrap());

        assert!(op.matches(&Value::Array(Vec::new()), &value).unwrap());
    }

    #[test]
    fn test_contains_any_requires_list_match_value() {
        let err = ContainsAnyOperator
            .matches(&Value::String("docs".into()), &stored(&["docs"]))
            .unwrap_err();
        assert!(matches!(err, ConditionError::InvalidOperation(_)));
    }
}
