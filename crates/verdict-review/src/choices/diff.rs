//! Diffed-file choices
//!
//! Two choices over the same derivation: `any_diffed_file` matches when any
//! file in the latest diff satisfies the operator, `all_diffed_files` when
//! every file does. Fetching the file listing can be expensive, so it goes
//! through the per-evaluation match state under a shared key: a condition set
//! using both choices fetches the diff once per `matches()` call.

use std::sync::Arc;

use verdict_core::operators::{
    ContainsOperator, DoesNotContainOperator, DoesNotMatchRegexOperator, EndsWithOperator,
    IsNotOperator, IsOperator, MatchesRegexOperator, OperatorSet, StartsWithOperator,
};
use verdict_core::{
    ConditionChoice, ConditionError, MatchMode, MatchState, Result, Value, ValueKind,
};

use crate::context::ReviewRequestContext;

/// Match-state key shared by both diffed-file choices
pub(crate) const DIFF_FILENAMES_KEY: &str = "diff_filenames";

fn file_operators() -> Result<OperatorSet> {
    OperatorSet::of(vec![
        Arc::new(IsOperator),
        Arc::new(IsNotOperator),
        Arc::new(ContainsOperator),
        Arc::new(DoesNotContainOperator),
        Arc::new(StartsWithOperator),
        Arc::new(EndsWithOperator),
        Arc::new(MatchesRegexOperator),
        Arc::new(DoesNotMatchRegexOperator),
    ])
}

/// A choice matching the filenames of the latest diff
pub struct DiffFileChoice {
    choice_id: &'static str,
    name: &'static str,
    mode: MatchMode,
    operators: OperatorSet,
}

impl DiffFileChoice {
    /// Matches when any diffed file satisfies the operator
    pub fn any_diffed_file() -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            choice_id: "any_diffed_file",
            name: "Any diffed file",
            mode: MatchMode::AnyItem,
            operators: file_operators()?,
        }))
    }

    /// Matches when every diffed file satisfies the operator
    pub fn all_diffed_files() -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            choice_id: "all_diffed_files",
            name: "All diffed files",
            mode: MatchMode::AllItems,
            operators: file_operators()?,
        }))
    }
}

impl ConditionChoice<ReviewRequestContext> for DiffFileChoice {
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

    fn match_mode(&self) -> MatchMode {
        self.mode
    }

    fn get_match_value(
        &self,
        context: &ReviewRequestContext,
        state: &mut MatchState,
    ) -> Result<Value> {
        state.cached_or_compute(DIFF_FILENAMES_KEY, || {
            context
                .diffs
                .latest_diff_filenames(&context.review_request)
                .map(Value::from)
                .map_err(|e| {
                    ConditionError::MatchValue(format!("diff file listing failed: {}", e))
                })
        })
    }
}
