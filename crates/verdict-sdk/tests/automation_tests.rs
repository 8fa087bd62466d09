//! Integration tests for the configuration boundary
//!
//! Tests the fail-closed policy end-to-end: stored condition data flows from
//! an automation config's settings blob through deserialization against the
//! review-request registry and evaluation against real contexts.

mod common;

use std::sync::Arc;

use common::{config_with_conditions, review_choices, review_context};
use verdict_review::{DiffSource, ReviewRequest, ReviewRequestContext, StoreError};
use verdict_sdk::{load_conditions, match_conditions, AutomationConfig, CONDITIONS_KEY};

// ============================================================================
// Matching stored conditions
// ============================================================================

#[test]
fn test_branch_and_summary_config_matches() {
    let choices = review_choices();
    let config = config_with_conditions(
        "notify-wip",
        r#"{
            "mode": "all",
            "conditions": [
                {"choice": "branch", "op": "is", "value": "master"},
                {"choice": "summary", "op": "contains", "value": "[WIP]"}
            ]
        }"#,
    );

    assert!(config.conditions_match(
        &choices,
        &review_context("master", "[WIP] This is a test.", &[])
    ));
    assert!(!config.conditions_match(
        &choices,
        &review_context("master", "This is a test.", &[])
    ));
    assert!(!config.conditions_match(
        &choices,
        &review_context("release", "[WIP] This is a test.", &[])
    ));
}

#[test]
fn test_no_conditions_means_no_restriction() {
    let choices = review_choices();
    let config = AutomationConfig::new("always-on");

    assert!(config.conditions_match(&choices, &review_context("anything", "at all", &[])));
}

#[test]
fn test_disabled_config_never_matches() {
    let choices = review_choices();
    let mut config = AutomationConfig::new("switched-off");
    config.enabled = false;

    assert!(!config.conditions_match(&choices, &review_context("master", "", &[])));
}

#[test]
fn test_empty_all_set_matches_everything() {
    let choices = review_choices();
    let config =
        config_with_conditions("vacuous", r#"{"mode": "all", "conditions": []}"#);

    assert!(config.conditions_match(&choices, &review_context("x", "y", &[])));
}

#[test]
fn test_empty_any_set_matches_nothing() {
    let choices = review_choices();
    let config =
        config_with_conditions("unsatisfiable", r#"{"mode": "any", "conditions": []}"#);

    assert!(!config.conditions_match(&choices, &review_context("x", "y", &[])));
}

// ============================================================================
// Configuration errors fail closed
// ============================================================================

#[test]
fn test_unknown_choice_loads_as_none() {
    let choices = review_choices();
    let config = config_with_conditions(
        "stale",
        r#"{
            "mode": "all",
            "conditions": [{"choice": "removed_by_plugin", "op": "is", "value": "x"}]
        }"#,
    );

    assert!(load_conditions(&choices, &config.settings, CONDITIONS_KEY).is_none());
    assert!(!config.conditions_match(&choices, &review_context("x", "", &[])));
}

#[test]
fn test_unknown_operator_fails_closed() {
    let choices = review_choices();
    let config = config_with_conditions(
        "bad-op",
        r#"{
            "mode": "all",
            "conditions": [{"choice": "branch", "op": "sounds-like", "value": "master"}]
        }"#,
    );

    assert!(!config.conditions_match(&choices, &review_context("master", "", &[])));
}

#[test]
fn test_bad_value_type_fails_closed() {
    let choices = review_choices();
    let config = config_with_conditions(
        "bad-value",
        r#"{
            "mode": "all",
            "conditions": [{"choice": "branch", "op": "is", "value": 42}]
        }"#,
    );

    assert!(!config.conditions_match(&choices, &review_context("42", "", &[])));
}

#[test]
fn test_bad_regex_fails_closed() {
    let choices = review_choices();
    let config = config_with_conditions(
        "bad-regex",
        r#"{
            "mode": "all",
            "conditions": [{"choice": "branch", "op": "matches-regex", "value": "[unclosed"}]
        }"#,
    );

    assert!(!config.conditions_match(&choices, &review_context("master", "", &[])));
}

#[test]
fn test_malformed_blob_fails_closed() {
    let choices = review_choices();
    let mut config = AutomationConfig::new("mangled");
    config.set(CONDITIONS_KEY, serde_json::json!(["not", "an", "object"]));

    assert!(!config.conditions_match(&choices, &review_context("master", "", &[])));
}

// ============================================================================
// Evaluation errors fail closed
// ============================================================================

struct FailingDiffSource;

impl DiffSource for FailingDiffSource {
    fn latest_diff_filenames(
        &self,
        _review_request: &ReviewRequest,
    ) -> Result<Vec<String>, StoreError> {
        Err(StoreError::Unavailable("diff store is down".into()))
    }
}

#[test]
fn test_evaluation_error_fails_closed() {
    let choices = review_choices();
    let config = config_with_conditions(
        "needs-diff",
        r#"{
            "mode": "all",
            "conditions": [{"choice": "any_diffed_file", "op": "ends-with", "value": ".rs"}]
        }"#,
    );

    // The conditions load fine; the diff fetch blows up at evaluation time
    assert!(load_conditions(&choices, &config.settings, CONDITIONS_KEY).is_some());

    let context =
        ReviewRequestContext::new(ReviewRequest::default(), Arc::new(FailingDiffSource));
    assert!(!config.conditions_match(&choices, &context));
}

#[test]
fn test_evaluation_error_in_any_mode_fails_closed() {
    let choices = review_choices();
    let settings = config_with_conditions(
        "needs-diff",
        r#"{
            "mode": "any",
            "conditions": [
                {"choice": "any_diffed_file", "op": "ends-with", "value": ".rs"},
                {"choice": "branch", "op": "is", "value": "master"}
            ]
        }"#,
    )
    .settings;

    // The failing condition comes first; the whole evaluation fails closed
    // rather than falling through to the branch condition.
    let context =
        ReviewRequestContext::new(ReviewRequest::default(), Arc::new(FailingDiffSource));
    assert!(!match_conditions(&choices, &settings, CONDITIONS_KEY, &context));
}
