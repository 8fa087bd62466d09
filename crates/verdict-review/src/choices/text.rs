//! Text field choices
//!
//! Branch, summary, description and testing-done all match a single string
//! field off the review request; one struct parameterized by accessor covers
//! them.

use std::sync::Arc;

use verdict_core::operators::{
    AnySetOperator, ContainsOperator, DoesNotContainOperator, DoesNotMatchRegexOperator,
    EndsWithOperator, IsNotOperator, IsOperator, MatchesRegexOperator, OperatorSet,
    StartsWithOperator, UnsetOperator,
};
use verdict_core::{ConditionChoice, MatchState, Result, Value, ValueKind};

use crate::context::ReviewRequestContext;
use crate::models::ReviewRequest;

/// Operators shared by every text field choice
pub(crate) fn text_operators() -> Result<OperatorSet> {
    OperatorSet::of(vec![
        Arc::new(IsOperator),
        Arc::new(IsNotOperator),
        Arc::new(ContainsOperator),
        Arc::new(DoesNotContainOperator),
        Arc::new(StartsWithOperator),
        Arc::new(EndsWithOperator),
        Arc::new(MatchesRegexOperator),
        Arc::new(DoesNotMatchRegexOperator),
        Arc::new(UnsetOperator),
        Arc::new(AnySetOperator),
    ])
}

fn branch_field(request: &ReviewRequest) -> &str {
    &request.branch
}

fn summary_field(request: &ReviewRequest) -> &str {
    &request.summary
}

fn description_field(request: &ReviewRequest) -> &str {
    &request.description
}

fn testing_done_field(request: &ReviewRequest) -> &str {
    &request.testing_done
}

/// A choice matching one string field of the review request
pub struct TextFieldChoice {
    choice_id: &'static str,
    name: &'static str,
    operators: OperatorSet,
    field: fn(&ReviewRequest) -> &str,
}

impl TextFieldChoice {
    fn new(
        choice_id: &'static str,
        name: &'static str,
        field: fn(&ReviewRequest) -> &str,
    ) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            choice_id,
            name,
            operators: text_operators()?,
            field,
        }))
    }

    /// The branch field
    pub fn branch() -> Result<Arc<Self>> {
        Self::new("branch", "Branch", branch_field)
    }

    /// The summary field
    pub fn summary() -> Result<Arc<Self>> {
        Self::new("summary", "Summary", summary_field)
    }

    /// The description field
    pub fn description() -> Result<Arc<Self>> {
        Self::new("description", "Description", description_field)
    }

    /// The testing-done field
    pub fn testing_done() -> Result<Arc<Self>> {
        Self::new("testing_done", "Testing Done", testing_done_field)
    }
}

impl ConditionChoice<ReviewRequestContext> for TextFieldChoice {
    fn choice_id(&self) -> &str {
        self.choice_id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    fn default_value_kind(&self) -> Option<ValueKind> {
        Some(ValueKind::String)
    }

    fn get_match_value(
        &self,
        context: &ReviewRequestContext,
        _state: &mut MatchState,
    ) -> Result<Value> {
        Ok(Value::String(
            (self.field)(&context.review_request).to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdict_core::Condition;

    fn context(branch: &str, summary: &str) -> ReviewRequestContext {
        ReviewRequestContext::with_static_diff(
            ReviewRequest {
                branch: branch.to_string(),
                summary: summary.to_string(),
                ..Default::default()
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_branch_is() {
        let condition = Condition::new(
            TextFieldChoice::branch().unwrap(),
            "is",
            Some(Value::String("master".into())),
        )
        .unwrap();

        let mut state = MatchState::new();
        assert!(condition.matches(&context("master", ""), &mut state).unwrap());
        assert!(!condition
            .matches(&context("release-2.0", ""), &mut state)
            .unwrap());
    }

    #[test]
    fn test_summary_contains() {
        let condition = Condition::new(
            TextFieldChoice::summary().unwrap(),
            "contains",
            Some(Value::String("[WIP]".into())),
        )
        .unwrap();

        let mut state = MatchState::new();
        assert!(condition
            .matches(&context("", "[WIP] This is a test."), &mut state)
            .unwrap());
        assert!(!condition
            .matches(&context("", "This is a test."), &mut state)
            .unwrap());
    }

    #[test]
    fn test_branch_unset() {
        let condition =
            Condition::new(TextFieldChoice::branch().unwrap(), "unset", None).unwrap();

        let mut state = MatchState::new();
        assert!(condition.matches(&context("", "x"), &mut state).unwrap());
        assert!(!condition.matches(&context("master", "x"), &mut state).unwrap());
    }

    #[test]
    fn test_branch_matches_regex() {
        let condition = Condition::new(
            TextFieldChoice::branch().unwrap(),
            "matches-regex",
            Some(Value::String(r"^release-\d+\.\d+$".into())),
        )
        .unwrap();

        let mut state = MatchState::new();
        assert!(condition
            .matches(&context("release-2.0", ""), &mut state)
            .unwrap());
        assert!(!condition.matches(&context("master", ""), &mut state).unwrap());
    }

    #[test]
    fn test_rejects_non_string_value() {
        let err = Condition::new(
            TextFieldChoice::testing_done().unwrap(),
            "is",
            Some(Value::Number(1.0)),
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected a string"));
    }
}
