//! Evaluation context for review-request conditions

use std::sync::Arc;

use crate::error::StoreError;
use crate::models::ReviewRequest;

/// Source of diff file listings
///
/// Fetching the latest diff is treated as a potentially blocking call into an
/// external store; the engine's per-evaluation match state bounds it to one
/// call per `ConditionSet::matches`.
pub trait DiffSource: Send + Sync {
    /// Filenames touched by the review request's latest diff
    fn latest_diff_filenames(&self, review_request: &ReviewRequest)
        -> Result<Vec<String>, StoreError>;
}

/// A fixed file listing, for tests and for callers that already have the diff
#[derive(Debug, Clone, Default)]
pub struct StaticDiffSource {
    filenames: Vec<String>,
}

impl StaticDiffSource {
    /// Create a source serving a fixed listing
    pub fn new(filenames: Vec<String>) -> Self {
        Self { filenames }
    }
}

impl DiffSource for StaticDiffSource {
    fn latest_diff_filenames(
        &self,
        _review_request: &ReviewRequest,
    ) -> Result<Vec<String>, StoreError> {
        Ok(self.filenames.clone())
    }
}

/// The context review-request conditions are evaluated against
#[derive(Clone)]
pub struct ReviewRequestContext {
    /// The review request being matched
    pub review_request: ReviewRequest,

    /// Diff listing collaborator
    pub diffs: Arc<dyn DiffSource>,
}

impl ReviewRequestContext {
    /// Create a context
    pub fn new(review_request: ReviewRequest, diffs: Arc<dyn DiffSource>) -> Self {
        Self {
            review_request,
            diffs,
        }
    }

    /// Create a context with a fixed diff file listing
    pub fn with_static_diff(review_request: ReviewRequest, filenames: Vec<String>) -> Self {
        Self::new(review_request, Arc::new(StaticDiffSource::new(filenames)))
    }
}

impl std::fmt::Debug for ReviewRequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewRequestContext")
            .field("review_request", &self.review_request)
            .finish()
    }
}
