//! Basic usage example for verdict-sdk
//!
//! Run with: cargo run --example automation_rules

use std::sync::Arc;

use verdict_review::{
    review_request_choices, InMemoryReviewStore, ReviewGroup, ReviewRequest,
    ReviewRequestContext, SiteScope,
};
use verdict_sdk::{AutomationConfig, CONDITIONS_KEY};

fn main() {
    println!("=== Verdict Automation Rules Example ===\n");

    // 1. Build the choice registry over a backing store
    let store = Arc::new(
        InMemoryReviewStore::new()
            .with_user("alice", None)
            .with_group("security", None, true, &["alice"]),
    );
    let choices = review_request_choices(store, SiteScope::Global).unwrap();
    println!("1. Registered choices: {:?}\n", choices.ids());

    // 2. A stored automation config: fire for security-group changes on main
    let mut config = AutomationConfig::new("notify-security-channel");
    config.set(
        CONDITIONS_KEY,
        serde_json::json!({
            "mode": "all",
            "conditions": [
                {"choice": "branch", "op": "is", "value": "main"},
                {"choice": "review_groups", "op": "contains-any", "value": ["security"]},
            ],
        }),
    );
    println!("2. Config '{}' stored conditions:", config.name);
    println!(
        "   {}\n",
        serde_json::to_string_pretty(&config.settings[CONDITIONS_KEY]).unwrap()
    );

    // 3. Evaluate against review requests
    let matching = ReviewRequestContext::with_static_diff(
        ReviewRequest {
            branch: "main".to_string(),
            summary: "Harden token validation".to_string(),
            target_groups: vec![ReviewGroup::new("security", true)],
            ..Default::default()
        },
        vec!["src/auth.rs".to_string()],
    );
    let other = ReviewRequestContext::with_static_diff(
        ReviewRequest {
            branch: "main".to_string(),
            summary: "Fix typo".to_string(),
            ..Default::default()
        },
        vec!["README.md".to_string()],
    );

    println!("3. Evaluation:");
    println!(
        "   security change on main -> {}",
        config.conditions_match(&choices, &matching)
    );
    println!(
        "   unrelated change on main -> {}",
        config.conditions_match(&choices, &other)
    );
}
