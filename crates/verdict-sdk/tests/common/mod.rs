//! Common test utilities for SDK integration tests

use std::sync::Arc;

use verdict_core::ConditionChoices;
use verdict_review::{
    review_request_choices, InMemoryReviewStore, ReviewRequest, ReviewRequestContext, SiteScope,
};
use verdict_sdk::{AutomationConfig, CONDITIONS_KEY};

/// Build the standard review-request choice registry over a seeded store
pub fn review_choices() -> ConditionChoices<ReviewRequestContext> {
    let store = Arc::new(
        InMemoryReviewStore::new()
            .with_user("alice", None)
            .with_user("bob", None)
            .with_group("docs", None, false, &[])
            .with_group("security", None, true, &["alice"])
            .with_repository("frontend", None),
    );

    review_request_choices(store, SiteScope::Global).unwrap()
}

/// Build a context from the fields the tests care about
pub fn review_context(branch: &str, summary: &str, files: &[&str]) -> ReviewRequestContext {
    ReviewRequestContext::with_static_diff(
        ReviewRequest {
            branch: branch.to_string(),
            summary: summary.to_string(),
            ..Default::default()
        },
        files.iter().map(|s| s.to_string()).collect(),
    )
}

/// Build an automation config with inline JSON condition data
pub fn config_with_conditions(name: &str, conditions_json: &str) -> AutomationConfig {
    let mut config = AutomationConfig::new(name);
    config.set(
        CONDITIONS_KEY,
        serde_json::from_str(conditions_json).unwrap(),
    );
    config
}
