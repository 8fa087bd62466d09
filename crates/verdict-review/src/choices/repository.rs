//! Repository and repository-type choices

use std::sync::Arc;

use verdict_core::operators::{NotOneOfOperator, OneOfOperator, OperatorSet};
use verdict_core::{ConditionChoice, ConditionError, Lookup, MatchState, Result, Value};

use crate::context::ReviewRequestContext;
use crate::store::{ReviewDataStore, SiteScope};

fn reference_operators() -> Result<OperatorSet> {
    OperatorSet::of(vec![Arc::new(OneOfOperator), Arc::new(NotOneOfOperator)])
}

/// The repository the change was posted against
pub struct RepositoryChoice {
    operators: OperatorSet,
    store: Arc<dyn ReviewDataStore>,
    scope: SiteScope,
}

impl RepositoryChoice {
    /// Create the repository choice
    pub fn new(store: Arc<dyn ReviewDataStore>, scope: SiteScope) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            operators: reference_operators()?,
            store,
            scope,
        }))
    }
}

impl ConditionChoice<ReviewRequestContext> for RepositoryChoice {
    fn choice_id(&self) -> &str {
        "repository"
    }

    fn name(&self) -> &str {
        "Repository"
    }

    fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    fn get_match_value(
        &self,
        context: &ReviewRequestContext,
        _state: &mut MatchState,
    ) -> Result<Value> {
        Ok(context
            .review_request
            .repository
            .as_ref()
            .map(|repository| Value::String(repository.name.clone()))
            .unwrap_or(Value::Null))
    }

    fn valid_values(&self, lookup: &Lookup) -> Option<Result<Vec<Value>>> {
        Some(
            self.store
                .repository_names(&self.scope, lookup)
                .map(|names| names.into_iter().map(Value::String).collect())
                .map_err(|e| {
                    ConditionError::ValueLookup(format!("repository lookup failed: {}", e))
                }),
        )
    }
}

/// The SCM tool of the repository the change was posted against
pub struct RepositoryTypeChoice {
    operators: OperatorSet,
}

impl RepositoryTypeChoice {
    /// Create the repository-type choice
    pub fn new() -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            operators: reference_operators()?,
        }))
    }
}

impl ConditionChoice<ReviewRequestContext> for RepositoryTypeChoice {
    fn choice_id(&self) -> &str {
        "repository_type"
    }

    fn name(&self) -> &str {
        "Repository type"
    }

    fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    fn get_match_value(
        &self,
        context: &ReviewRequestContext,
        _state: &mut MatchState,
    ) -> Result<Value> {
        Ok(context
            .review_request
            .repository
            .as_ref()
            .map(|repository| Value::String(repository.tool.clone()))
            .unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Repository, ReviewRequest};
    use crate::store::InMemoryReviewStore;
    use verdict_core::Condition;

    fn store() -> Arc<dyn ReviewDataStore> {
        Arc::new(
            InMemoryReviewStore::new()
                .with_repository("frontend", None)
                .with_repository("backend", None),
        )
    }

    fn context(repository: Option<Repository>) -> ReviewRequestContext {
        ReviewRequestContext::with_static_diff(
            ReviewRequest {
                repository,
                ..Default::default()
            },
            Vec::new(),
        )
    }

    fn names(values: &[&str]) -> Value {
        Value::from(values.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    #[test]
    fn test_repository_one_of() {
        let choice = RepositoryChoice::new(store(), SiteScope::Global).unwrap();
        let condition =
            Condition::new(choice, "one-of", Some(names(&["frontend", "backend"]))).unwrap();

        let mut state = MatchState::new();
        assert!(condition
            .matches(&context(Some(Repository::new("frontend", "Git"))), &mut state)
            .unwrap());
        assert!(!condition
            .matches(&context(Some(Repository::new("website", "Git"))), &mut state)
            .unwrap());

        // No repository attached never matches a membership test
        assert!(!condition.matches(&context(None), &mut state).unwrap());
    }

    #[test]
    fn test_repository_type_not_one_of() {
        let choice = RepositoryTypeChoice::new().unwrap();
        let condition =
            Condition::new(choice, "not-one-of", Some(names(&["Subversion"]))).unwrap();

        let mut state = MatchState::new();
        assert!(condition
            .matches(&context(Some(Repository::new("frontend", "Git"))), &mut state)
            .unwrap());
        assert!(!condition
            .matches(
                &context(Some(Repository::new("legacy", "Subversion"))),
                &mut state
            )
            .unwrap());
    }

    #[test]
    fn test_repository_valid_values() {
        let choice = RepositoryChoice::new(store(), SiteScope::Global).unwrap();
        let values = choice.valid_values(&Lookup::Matching).unwrap().unwrap();
        assert_eq!(
            values,
            vec![
                Value::String("frontend".into()),
                Value::String("backend".into()),
            ]
        );
    }
}
