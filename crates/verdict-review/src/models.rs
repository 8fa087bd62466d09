//! Data models for the review-request domain
//!
//! These mirror what the surrounding review system hands the engine: plain
//! data read through attribute access, never written.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use verdict_core::Value;

/// A review group a change can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewGroup {
    /// Group name
    pub name: String,
    /// Whether the group is invite-only (hidden from non-members)
    #[serde(default)]
    pub invite_only: bool,
}

impl ReviewGroup {
    /// Create a group
    pub fn new(name: impl Into<String>, invite_only: bool) -> Self {
        Self {
            name: name.into(),
            invite_only,
        }
    }

    /// The match-value form used by the review-groups choice
    pub fn to_value(&self) -> Value {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), Value::String(self.name.clone()));
        fields.insert("invite_only".to_string(), Value::Bool(self.invite_only));
        Value::Object(fields)
    }
}

/// A source code repository a change is posted against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository name
    pub name: String,
    /// SCM tool name (e.g. "Git")
    pub tool: String,
}

impl Repository {
    /// Create a repository
    pub fn new(name: impl Into<String>, tool: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tool: tool.into(),
        }
    }
}

/// A review request, as seen by the condition engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    /// Branch the change targets
    #[serde(default)]
    pub branch: String,

    /// One-line summary
    #[serde(default)]
    pub summary: String,

    /// Full description
    #[serde(default)]
    pub description: String,

    /// Testing notes
    #[serde(default)]
    pub testing_done: String,

    /// Username of the owner
    #[serde(default)]
    pub owner: String,

    /// Usernames of the assigned reviewers
    #[serde(default)]
    pub target_people: Vec<String>,

    /// Usernames of everyone who has reviewed or commented
    #[serde(default)]
    pub participants: Vec<String>,

    /// Review groups the change is assigned to
    #[serde(default)]
    pub target_groups: Vec<ReviewGroup>,

    /// Repository the change was posted against, if any
    #[serde(default)]
    pub repository: Option<Repository>,
}
