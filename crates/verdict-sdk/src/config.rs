//! Stored automation configurations
//!
//! An `AutomationConfig` is one named entry of a larger system (an
//! integration, a notification hook) whose settings blob carries a condition
//! set deciding when it applies.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use verdict_core::ConditionChoices;

use crate::conditions::{match_conditions, CONDITIONS_KEY};

fn default_enabled() -> bool {
    true
}

/// A named, stored configuration carrying a settings blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomationConfig {
    /// Unique config name
    pub name: String,

    /// Whether this config is active at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Free-form settings; conditions live under `CONDITIONS_KEY`
    #[serde(default)]
    pub settings: HashMap<String, serde_json::Value>,
}

impl AutomationConfig {
    /// Create an enabled config with empty settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            settings: HashMap::new(),
        }
    }

    /// Set a settings entry
    pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.settings.insert(key.into(), value);
    }

    /// Whether this config's conditions match `context`.
    ///
    /// A disabled config never matches. Everything else follows the
    /// fail-closed policy of `match_conditions`, with this config's name in
    /// the log context.
    pub fn conditions_match<C>(&self, choices: &ConditionChoices<C>, context: &C) -> bool {
        if !self.enabled {
            tracing::debug!("automation config '{}' is disabled", self.name);
            return false;
        }

        let _span =
            tracing::debug_span!("conditions_match", config = %self.name).entered();
        let matched = match_conditions(choices, &self.settings, CONDITIONS_KEY, context);

        tracing::debug!(
            "automation config '{}' conditions matched={}",
            self.name,
            matched
        );
        matched
    }
}
