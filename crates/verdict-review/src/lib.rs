//! Verdict Review - Review-request condition choices
//!
//! This crate binds the generic condition engine to the review-request
//! domain: the context object evaluations run against, the collaborator
//! traits supplying diff listings and queryable user/group/repository
//! universes, and the standard set of choices (branch, summary, owner,
//! reviewers, review groups, diffed files, ...).

pub mod choices;
pub mod context;
pub mod error;
pub mod models;
pub mod store;

// Re-export main types
pub use choices::review_request_choices;
pub use context::{DiffSource, ReviewRequestContext, StaticDiffSource};
pub use error::StoreError;
pub use models::{Repository, ReviewGroup, ReviewRequest};
pub use store::{InMemoryReviewStore, ReviewDataStore, SiteScope};
