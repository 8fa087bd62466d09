//! Review group choice and its operators
//!
//! The match value is the list of assigned group objects, so the operators
//! here are domain-specific: name membership tests plus predicates over the
//! groups' invite-only flag.
//!
//! `any-public` and `all-invite-only` both treat an empty group list as
//! non-matching. That is not standard quantifier semantics for the universal
//! case, but it is what the surrounding product relies on for
//! access-control-adjacent filtering, and it is kept deliberately.

use std::sync::Arc;

use verdict_core::operators::{AnySetOperator, OperatorSet, UnsetOperator};
use verdict_core::{
    ConditionChoice, ConditionError, ConditionOperator, ConditionValue, Lookup, MatchState,
    Result, Value, ValueKind,
};

use crate::context::ReviewRequestContext;
use crate::store::{ReviewDataStore, SiteScope};

fn group_items<'a>(match_value: &'a Value, operator_id: &str) -> Result<&'a [Value]> {
    match_value.as_array().ok_or_else(|| {
        ConditionError::InvalidOperation(format!(
            "operator '{}' requires a group list match value, got {}",
            operator_id,
            match_value.type_name()
        ))
    })
}

fn group_name<'a>(item: &'a Value, operator_id: &str) -> Result<&'a str> {
    item.as_object()
        .and_then(|fields| fields.get("name"))
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ConditionError::InvalidOperation(format!(
                "operator '{}' expected group objects with a 'name' field",
                operator_id
            ))
        })
}

fn group_invite_only(item: &Value, operator_id: &str) -> Result<bool> {
    match item.as_object().and_then(|fields| fields.get("invite_only")) {
        Some(Value::Bool(invite_only)) => Ok(*invite_only),
        _ => Err(ConditionError::InvalidOperation(format!(
            "operator '{}' expected group objects with an 'invite_only' flag",
            operator_id
        ))),
    }
}

/// True iff any assigned group's name is in the stored list
#[derive(Debug, Clone, Copy)]
pub struct GroupsContainAnyOperator;

impl ConditionOperator for GroupsContainAnyOperator {
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
        let stored = match condition_value {
            ConditionValue::Plain(Value::Array(names)) => names,
            _ => {
                return Err(ConditionError::InvalidOperation(format!(
                    "operator '{}' expected a stored list value",
                    self.operator_id()
                )))
            }
        };

        for item in group_items(match_value, self.operator_id())? {
            let name = group_name(item, self.operator_id())?;
            if stored.contains(&Value::String(name.to_string())) {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// True iff no assigned group's name is in the stored list
#[derive(Debug, Clone, Copy)]
pub struct GroupsDoNotContainAnyOperator;

impl ConditionOperator for GroupsDoNotContainAnyOperator {
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
        GroupsContainAnyOperator
            .matches(match_value, condition_value)
            .map(|matched| !matched)
    }
}

/// True iff the group list is non-empty and at least one group is public
#[derive(Debug, Clone, Copy)]
pub struct AnyGroupsPublicOperator;

impl ConditionOperator for AnyGroupsPublicOperator {
    fn operator_id(&self) -> &str {
        "any-public"
    }

    fn name(&self) -> &str {
        "Any public groups"
    }

    fn requires_value(&self) -> bool {
        false
    }

    fn matches(&self, match_value: &Value, _condition_value: &ConditionValue) -> Result<bool> {
        // An empty list is non-matching, not vacuous
        for item in group_items(match_value, self.operator_id())? {
            if !group_invite_only(item, self.operator_id())? {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

/// True iff the group list is non-empty and every group is invite-only
#[derive(Debug, Clone, Copy)]
pub struct AllGroupsInviteOnlyOperator;

impl ConditionOperator for AllGroupsInviteOnlyOperator {
    fn operator_id(&self) -> &str {
        "all-invite-only"
    }

    fn name(&self) -> &str {
        "All invite-only groups"
    }

    fn requires_value(&self) -> bool {
        false
    }

    fn matches(&self, match_value: &Value, _condition_value: &ConditionValue) -> Result<bool> {
        let items = group_items(match_value, self.operator_id())?;

        // An empty list is non-matching, not vacuous
        if items.is_empty() {
            return Ok(false);
        }

        for item in items {
            if !group_invite_only(item, self.operator_id())? {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

/// The review groups assigned to the change
pub struct ReviewGroupsChoice {
    operators: OperatorSet,
    store: Arc<dyn ReviewDataStore>,
    scope: SiteScope,
}

impl ReviewGroupsChoice {
    /// Create the review-groups choice
    pub fn new(store: Arc<dyn ReviewDataStore>, scope: SiteScope) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            operators: OperatorSet::of(vec![
                Arc::new(GroupsContainAnyOperator),
                Arc::new(GroupsDoNotContainAnyOperator),
                Arc::new(AnyGroupsPublicOperator),
                Arc::new(AllGroupsInviteOnlyOperator),
                Arc::new(UnsetOperator),
                Arc::new(AnySetOperator),
            ])?,
            store,
            scope,
        }))
    }
}

impl ConditionChoice<ReviewRequestContext> for ReviewGroupsChoice {
    fn choice_id(&self) -> &str {
        "review_groups"
    }

    fn name(&self) -> &str {
        "Review groups"
    }

    fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    fn get_match_value(
        &self,
        context: &ReviewRequestContext,
        _state: &mut MatchState,
    ) -> Result<Value> {
        Ok(Value::Array(
            context
                .review_request
                .target_groups
                .iter()
                .map(|group| group.to_value())
                .collect(),
        ))
    }

    fn valid_values(&self, lookup: &Lookup) -> Option<Result<Vec<Value>>> {
        Some(
            self.store
                .group_names(&self.scope, lookup)
                .map(|names| names.into_iter().map(Value::String).collect())
                .map_err(|e| {
                    ConditionError::ValueLookup(format!("group lookup failed: {}", e))
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReviewGroup, ReviewRequest};
    use crate::store::InMemoryReviewStore;
    use verdict_core::Condition;

    fn choice() -> Arc<ReviewGroupsChoice> {
        ReviewGroupsChoice::new(Arc::new(InMemoryReviewStore::new()), SiteScope::Global).unwrap()
    }

    fn context(groups: &[(&str, bool)]) -> ReviewRequestContext {
        ReviewRequestContext::with_static_diff(
            ReviewRequest {
                target_groups: groups
                    .iter()
                    .map(|(name, invite_only)| ReviewGroup::new(*name, *invite_only))
                    .collect(),
                ..Default::default()
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_any_public() {
        let condition = Condition::new(choice(), "any-public", None).unwrap();
        let mut state = MatchState::new();

        assert!(condition
            .matches(&context(&[("docs", false)]), &mut state)
            .unwrap());
        assert!(condition
            .matches(&context(&[("security", true), ("docs", false)]), &mut state)
            .unwrap());
        assert!(!condition
            .matches(&context(&[("security", true)]), &mut state)
            .unwrap());
        assert!(!condition.matches(&context(&[]), &mut state).unwrap());
    }

    #[test]
    fn test_all_invite_only() {
        let condition = Condition::new(choice(), "all-invite-only", None).unwrap();
        let mut state = MatchState::new();

        assert!(condition
            .matches(
                &context(&[("security", true), ("finance", true)]),
                &mut state
            )
            .unwrap());
        assert!(!condition
            .matches(&context(&[("docs", false), ("security", true)]), &mut state)
            .unwrap());
        assert!(!condition.matches(&context(&[]), &mut state).unwrap());
    }

    #[test]
    fn test_contains_any_by_name() {
        let condition = Condition::new(
            choice(),
            "contains-any",
            Some(Value::from(vec!["security".to_string()])),
        )
        .unwrap();
        let mut state = MatchState::new();

        assert!(condition
            .matches(&context(&[("docs", false), ("security", true)]), &mut state)
            .unwrap());
        assert!(!condition
            .matches(&context(&[("docs", false)]), &mut state)
            .unwrap());
        assert!(!condition.matches(&context(&[]), &mut state).unwrap());
    }

    #[test]
    fn test_does_not_contain_any() {
        let condition = Condition::new(
            choice(),
            "does-not-contain-any",
            Some(Value::from(vec!["security".to_string()])),
        )
        .unwrap();
        let mut state = MatchState::new();

        assert!(condition
            .matches(&context(&[("docs", false)]), &mut state)
            .unwrap());
        assert!(!condition
            .matches(&context(&[("security", true)]), &mut state)
            .unwrap());
        assert!(condition.matches(&context(&[]), &mut state).unwrap());
    }

    #[test]
    fn test_invite_only_operators_take_no_value() {
        let err = Condition::new(
            choice(),
            "any-public",
            Some(Value::String("x".into())),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConditionError::UnexpectedConditionValue { .. }
        ));
    }
}
