//! Review-request condition choices
//!
//! `review_request_choices` builds the standard registry. Registration order
//! is stable and is what configuration UIs present; plugins append their own
//! choices to the returned registry at runtime.

pub mod diff;
pub mod groups;
pub mod people;
pub mod repository;
pub mod text;

use std::sync::Arc;

use verdict_core::{ConditionChoices, Result};

use crate::context::ReviewRequestContext;
use crate::store::{ReviewDataStore, SiteScope};

pub use diff::DiffFileChoice;
pub use groups::{
    AllGroupsInviteOnlyOperator, AnyGroupsPublicOperator, GroupsContainAnyOperator,
    GroupsDoNotContainAnyOperator, ReviewGroupsChoice,
};
pub use people::{OwnerChoice, UserListChoice};
pub use repository::{RepositoryChoice, RepositoryTypeChoice};
pub use text::TextFieldChoice;

/// Build the standard review-request choice registry
pub fn review_request_choices(
    store: Arc<dyn ReviewDataStore>,
    scope: SiteScope,
) -> Result<ConditionChoices<ReviewRequestContext>> {
    let mut choices = ConditionChoices::new();

    choices.register(TextFieldChoice::branch()?)?;
    choices.register(TextFieldChoice::summary()?)?;
    choices.register(TextFieldChoice::description()?)?;
    choices.register(TextFieldChoice::testing_done()?)?;
    choices.register(OwnerChoice::new(store.clone(), scope.clone())?)?;
    choices.register(UserListChoice::reviewer(store.clone(), scope.clone())?)?;
    choices.register(UserListChoice::participant(store.clone(), scope.clone())?)?;
    choices.register(ReviewGroupsChoice::new(store.clone(), scope.clone())?)?;
    choices.register(RepositoryChoice::new(store, scope)?)?;
    choices.register(RepositoryTypeChoice::new()?)?;
    choices.register(DiffFileChoice::any_diffed_file()?)?;
    choices.register(DiffFileChoice::all_diffed_files()?)?;

    tracing::debug!(
        "built review request choice registry with {} choices",
        choices.len()
    );
    Ok(choices)
}
