//! Conditions and condition sets
//!
//! A condition is an immutable (choice, operator, stored value) triple; a
//! condition set combines an ordered list of conditions under ALL or ANY
//! semantics. Both are plain value objects: evaluation is a pure computation
//! per call, sharing nothing across calls except the per-call `MatchState`.

pub mod serialize;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::choice::{ConditionChoice, MatchMode, MatchState};
use crate::error::{ConditionError, Result};
use crate::operators::ConditionOperator;
use crate::types::{Value, ValueKind};

pub use serialize::{SerializedCondition, SerializedConditionSet};

/// A stored condition value, prepared for evaluation
///
/// Preparation happens once, at condition construction: values are validated
/// against the operator's (or choice's) kind, and regex patterns are compiled.
#[derive(Debug, Clone)]
pub enum ConditionValue {
    /// The operator takes no stored value
    None,
    /// A validated plain value
    Plain(Value),
    /// A compiled regular expression; `pattern` is the serialized form
    Regex { pattern: String, regex: regex::Regex },
}

impl ConditionValue {
    /// Validate `raw` against `kind` and build the prepared form
    pub fn prepare(kind: ValueKind, raw: Value) -> Result<Self> {
        match kind {
            ValueKind::Regex => {
                let pattern = raw
                    .as_str()
                    .ok_or_else(|| ConditionError::InvalidConditionValue {
                        expected: "a regex pattern string",
                        actual: raw.type_name().to_string(),
                    })?;

                let regex =
                    regex::Regex::new(pattern).map_err(|e| ConditionError::InvalidRegex {
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    })?;

                Ok(ConditionValue::Regex {
                    pattern: pattern.to_string(),
                    regex,
                })
            }
            _ => {
                kind.validate(&raw)?;
                Ok(ConditionValue::Plain(raw))
            }
        }
    }

    /// The plain-data form written out by serialization
    pub fn to_plain(&self) -> Option<Value> {
        match self {
            ConditionValue::None => None,
            ConditionValue::Plain(v) => Some(v.clone()),
            ConditionValue::Regex { pattern, .. } => Some(Value::String(pattern.clone())),
        }
    }
}

/// One (choice, operator, stored value) triple
pub struct Condition<C> {
    choice: Arc<dyn ConditionChoice<C>>,
    operator: Arc<dyn ConditionOperator>,
    value: ConditionValue,
}

impl<C> Condition<C> {
    /// Build a condition, validating the operator id and the stored value.
    ///
    /// Invalid combinations fail here, not at match time: an unknown operator
    /// id, a value given to a value-less operator, a missing value for an
    /// operator that needs one, or a value of the wrong shape are all hard
    /// errors.
    pub fn new(
        choice: Arc<dyn ConditionChoice<C>>,
        operator_id: &str,
        value: Option<Value>,
    ) -> Result<Self> {
        let operator = choice
            .operators()
            .get(operator_id)
            .cloned()
            .ok_or_else(|| ConditionError::UnknownOperator {
                choice_id: choice.choice_id().to_string(),
                operator_id: operator_id.to_string(),
            })?;

        let value = if operator.requires_value() {
            let raw = value.ok_or_else(|| ConditionError::MissingConditionValue {
                operator_id: operator_id.to_string(),
            })?;

            let kind = operator
                .value_kind()
                .or_else(|| choice.default_value_kind())
                .unwrap_or(ValueKind::Any);

            ConditionValue::prepare(kind, raw)?
        } else {
            if value.is_some() {
                return Err(ConditionError::UnexpectedConditionValue {
                    operator_id: operator_id.to_string(),
                });
            }
            ConditionValue::None
        };

        Ok(Self {
            choice,
            operator,
            value,
        })
    }

    /// The condition's choice
    pub fn choice(&self) -> &Arc<dyn ConditionChoice<C>> {
        &self.choice
    }

    /// The condition's operator
    pub fn operator(&self) -> &Arc<dyn ConditionOperator> {
        &self.operator
    }

    /// The prepared stored value
    pub fn value(&self) -> &ConditionValue {
        &self.value
    }

    /// Evaluate this condition against a context.
    ///
    /// Derives the match value through the choice (sharing `state` with the
    /// rest of the evaluation), then applies the operator per the choice's
    /// match mode.
    pub fn matches(&self, context: &C, state: &mut MatchState) -> Result<bool> {
        let match_value = self.choice.get_match_value(context, state)?;

        match self.choice.match_mode() {
            MatchMode::Whole => self.operator.matches(&match_value, &self.value),
            MatchMode::AnyItem => {
                for item in self.list_items(&match_value)? {
                    if self.operator.matches(item, &self.value)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            MatchMode::AllItems => {
                for item in self.list_items(&match_value)? {
                    if !self.operator.matches(item, &self.value)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }

    fn list_items<'a>(&self, match_value: &'a Value) -> Result<&'a [Value]> {
        match_value.as_array().ok_or_else(|| {
            ConditionError::MatchValue(format!(
                "choice '{}' is item-matched but produced a {} match value",
                self.choice.choice_id(),
                match_value.type_name()
            ))
        })
    }
}

impl<C> Clone for Condition<C> {
    fn clone(&self) -> Self {
        Self {
            choice: Arc::clone(&self.choice),
            operator: Arc::clone(&self.operator),
            value: self.value.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Condition<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Condition")
            .field("choice", &self.choice.choice_id())
            .field("op", &self.operator.operator_id())
            .field("value", &self.value)
            .finish()
    }
}

/// How a condition set combines its conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionSetMode {
    /// Logical AND; an empty set matches everything
    All,
    /// Logical OR; an empty set matches nothing
    Any,
}

/// An ordered collection of conditions plus a combination mode
pub struct ConditionSet<C> {
    mode: ConditionSetMode,
    conditions: Vec<Condition<C>>,
}

impl<C> ConditionSet<C> {
    /// Create a condition set
    pub fn new(mode: ConditionSetMode, conditions: Vec<Condition<C>>) -> Self {
        Self { mode, conditions }
    }

    /// The combination mode
    pub fn mode(&self) -> ConditionSetMode {
        self.mode
    }

    /// The conditions, in order
    pub fn conditions(&self) -> &[Condition<C>] {
        &self.conditions
    }

    /// Number of conditions
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Whether the set has no conditions
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Evaluate the set against a context.
    ///
    /// Allocates a fresh `MatchState` for this call and short-circuits: ALL
    /// stops on the first false, ANY on the first true. Errors from a choice
    /// derivation or an operator propagate to the caller untouched; the
    /// configuration boundary decides how to fail.
    pub fn matches(&self, context: &C) -> Result<bool> {
        let mut state = MatchState::new();

        let result = match self.mode {
            ConditionSetMode::All => {
                let mut matched = true;
                for condition in &self.conditions {
                    if !condition.matches(context, &mut state)? {
                        matched = false;
                        break;
                    }
                }
                matched
            }
            ConditionSetMode::Any => {
                let mut matched = false;
                for condition in &self.conditions {
                    if condition.matches(context, &mut state)? {
                        matched = true;
                        break;
                    }
                }
                matched
            }
        };

        tracing::debug!(
            "condition set ({:?}, {} conditions) matched={}",
            self.mode,
            self.conditions.len(),
            result
        );

        Ok(result)
    }
}

impl<C> Clone for ConditionSet<C> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            conditions: self.conditions.clone(),
        }
    }
}

impl<C> std::fmt::Debug for ConditionSet<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionSet")
            .field("mode", &self.mode)
            .field("conditions", &self.conditions)
            .finish()
    }
}
