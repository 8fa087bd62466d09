//! Owner, reviewer and participant choices
//!
//! These wrap user references: the owner is a single username, reviewers and
//! participants are username lists. All three enumerate their valid universe
//! through the review data store.

use std::sync::Arc;

use verdict_core::operators::{
    AnySetOperator, ContainsAnyOperator, DoesNotContainAnyOperator, NotOneOfOperator,
    OneOfOperator, OperatorSet, UnsetOperator,
};
use verdict_core::{ConditionChoice, ConditionError, Lookup, MatchState, Result, Value};

use crate::context::ReviewRequestContext;
use crate::models::ReviewRequest;
use crate::store::{ReviewDataStore, SiteScope};

fn lookup_usernames(
    store: &dyn ReviewDataStore,
    scope: &SiteScope,
    lookup: &Lookup,
) -> Result<Vec<Value>> {
    store
        .usernames(scope, lookup)
        .map(|names| names.into_iter().map(Value::String).collect())
        .map_err(|e| ConditionError::ValueLookup(format!("user lookup failed: {}", e)))
}

/// The review request's owner
pub struct OwnerChoice {
    operators: OperatorSet,
    store: Arc<dyn ReviewDataStore>,
    scope: SiteScope,
}

impl OwnerChoice {
    /// Create the owner choice
    pub fn new(store: Arc<dyn ReviewDataStore>, scope: SiteScope) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            operators: OperatorSet::of(vec![
                Arc::new(OneOfOperator),
                Arc::new(NotOneOfOperator),
            ])?,
            store,
            scope,
        }))
    }
}

impl ConditionChoice<ReviewRequestContext> for OwnerChoice {
    fn choice_id(&self) -> &str {
        "owner"
    }

    fn name(&self) -> &str {
        "Owner"
    }

    fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    fn get_match_value(
        &self,
        context: &ReviewRequestContext,
        _state: &mut MatchState,
    ) -> Result<Value> {
        Ok(Value::String(context.review_request.owner.clone()))
    }

    fn valid_values(&self, lookup: &Lookup) -> Option<Result<Vec<Value>>> {
        Some(lookup_usernames(self.store.as_ref(), &self.scope, lookup))
    }
}

fn target_people_field(request: &ReviewRequest) -> &[String] {
    &request.target_people
}

fn participants_field(request: &ReviewRequest) -> &[String] {
    &request.participants
}

/// A user-list choice: reviewers or participants
pub struct UserListChoice {
    choice_id: &'static str,
    name: &'static str,
    operators: OperatorSet,
    field: fn(&ReviewRequest) -> &[String],
    store: Arc<dyn ReviewDataStore>,
    scope: SiteScope,
}

impl UserListChoice {
    fn new(
        choice_id: &'static str,
        name: &'static str,
        field: fn(&ReviewRequest) -> &[String],
        store: Arc<dyn ReviewDataStore>,
        scope: SiteScope,
    ) -> Result<Arc<Self>> {
        Ok(Arc::new(Self {
            choice_id,
            name,
            operators: OperatorSet::of(vec![
                Arc::new(ContainsAnyOperator),
                Arc::new(DoesNotContainAnyOperator),
                Arc::new(UnsetOperator),
                Arc::new(AnySetOperator),
            ])?,
            field,
            store,
            scope,
        }))
    }

    /// The assigned reviewers
    pub fn reviewer(store: Arc<dyn ReviewDataStore>, scope: SiteScope) -> Result<Arc<Self>> {
        Self::new("reviewer", "Reviewer", target_people_field, store, scope)
    }

    /// Everyone who has reviewed or commented
    pub fn participant(store: Arc<dyn ReviewDataStore>, scope: SiteScope) -> Result<Arc<Self>> {
        Self::new("participant", "Participant", participants_field, store, scope)
    }
}

impl ConditionChoice<ReviewRequestContext> for UserListChoice {
    fn choice_id(&self) -> &str {
        self.choice_id
    }

    fn name(&self) -> &str {
        self.name
    }

    fn operators(&self) -> &OperatorSet {
        &self.operators
    }

    fn get_match_value(
        &self,
        context: &ReviewRequestContext,
        _state: &mut MatchState,
    ) -> Result<Value> {
        Ok(Value::from((self.field)(&context.review_request).to_vec()))
    }

    fn valid_values(&self, lookup: &Lookup) -> Option<Result<Vec<Value>>> {
        Some(lookup_usernames(self.store.as_ref(), &self.scope, lookup))
    }
}
