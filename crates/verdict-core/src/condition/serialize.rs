//! Plain-data serialization for condition sets
//!
//! The stored form is deliberately simple so it can live inside a larger
//! configuration blob:
//!
//! ```json
//! {
//!   "mode": "all",
//!   "conditions": [
//!     {"choice": "branch", "op": "is", "value": "master"}
//!   ]
//! }
//! ```
//!
//! Deserialization resolves ids against a caller-supplied registry and fails
//! with a descriptive, typed error on anything unknown or malformed; callers
//! at the configuration boundary decide whether to surface or swallow it.

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, ConditionSet, ConditionSetMode};
use crate::error::Result;
use crate::registry::ConditionChoices;
use crate::types::Value;

/// Stored form of one condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedCondition {
    /// Choice id, resolved against the registry on load
    pub choice: String,

    /// Operator id, resolved within the choice's operator set
    pub op: String,

    /// Stored value; absent for operators that take none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Stored form of a condition set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedConditionSet {
    /// Combination mode
    pub mode: ConditionSetMode,

    /// Conditions, in evaluation order
    pub conditions: Vec<SerializedCondition>,
}

impl<C> ConditionSet<C> {
    /// Produce the plain-data form of this set
    pub fn serialize(&self) -> SerializedConditionSet {
        SerializedConditionSet {
            mode: self.mode(),
            conditions: self
                .conditions()
                .iter()
                .map(|condition| SerializedCondition {
                    choice: condition.choice().choice_id().to_string(),
                    op: condition.operator().operator_id().to_string(),
                    value: condition.value().to_plain(),
                })
                .collect(),
        }
    }

    /// Rebuild a condition set from its plain-data form.
    ///
    /// Every condition is validated against `choices`: unknown choice ids,
    /// unknown operator ids and ill-shaped values are hard errors.
    pub fn deserialize(
        choices: &ConditionChoices<C>,
        data: &SerializedConditionSet,
    ) -> Result<Self> {
        let mut conditions = Vec::with_capacity(data.conditions.len());

        for serialized in &data.conditions {
            let choice = choices.get_or_err(&serialized.choice)?;
            conditions.push(Condition::new(
                choice.clone(),
                &serialized.op,
                serialized.value.clone(),
            )?);
        }

        Ok(ConditionSet::new(data.mode, conditions))
    }
}
