//! Operator framework
//!
//! An operator is a named, stateless predicate over a match value (derived
//! from the context by a choice) and an optional stored condition value.
//! Operators are constructed once, collected into per-choice `OperatorSet`s,
//! and shared across evaluations.

pub mod membership;
pub mod presence;
pub mod string;

use std::sync::Arc;

use crate::condition::ConditionValue;
use crate::error::{ConditionError, Result};
use crate::types::{Value, ValueKind};

pub use membership::{
    ContainsAnyOperator, DoesNotContainAnyOperator, NotOneOfOperator, OneOfOperator,
};
pub use presence::{AnySetOperator, UnsetOperator};
pub use string::{
    ContainsOperator, DoesNotContainOperator, DoesNotMatchRegexOperator, EndsWithOperator,
    IsNotOperator, IsOperator, MatchesRegexOperator, StartsWithOperator,
};

/// A named predicate over a match value and a stored condition value
pub trait ConditionOperator: Send + Sync {
    /// Unique id within a choice's operator set
    fn operator_id(&self) -> &str;

    /// Display label
    fn name(&self) -> &str;

    /// Whether this operator takes a stored condition value
    fn requires_value(&self) -> bool {
        true
    }

    /// Operator-specific value kind.
    ///
    /// `None` falls back to the owning choice's default kind, and to
    /// `ValueKind::Any` if the choice has no default either.
    fn value_kind(&self) -> Option<ValueKind> {
        None
    }

    /// Test the match value against the stored condition value.
    ///
    /// The stored value was validated and prepared when the condition was
    /// constructed; a shape mismatch here is a programmer error and surfaces
    /// as `ConditionError::InvalidOperation`.
    fn matches(&self, match_value: &Value, condition_value: &ConditionValue) -> Result<bool>;
}

/// Ordered, id-keyed set of operators belonging to one choice
///
/// Operator sets are small (a dozen entries at most), so lookup is a linear
/// scan and iteration preserves registration order.
#[derive(Clone, Default)]
pub struct OperatorSet {
    operators: Vec<Arc<dyn ConditionOperator>>,
}

impl OperatorSet {
    /// Create an empty operator set
    pub fn new() -> Self {
        Self {
            operators: Vec::new(),
        }
    }

    /// Build a set from a list of operators, rejecting duplicate ids
    pub fn of(operators: Vec<Arc<dyn ConditionOperator>>) -> Result<Self> {
        let mut set = Self::new();
        for op in operators {
            set.register(op)?;
        }
        Ok(set)
    }

    /// Add an operator, rejecting duplicate ids
    pub fn register(&mut self, operator: Arc<dyn ConditionOperator>) -> Result<()> {
        if self.contains(operator.operator_id()) {
            return Err(ConditionError::DuplicateOperator {
                operator_id: operator.operator_id().to_string(),
            });
        }

        self.operators.push(operator);
        Ok(())
    }

    /// Look up an operator by id
    pub fn get(&self, operator_id: &str) -> Option<&Arc<dyn ConditionOperator>> {
        self.operators
            .iter()
            .find(|op| op.operator_id() == operator_id)
    }

    /// Whether an operator with this id is in the set
    pub fn contains(&self, operator_id: &str) -> bool {
        self.get(operator_id).is_some()
    }

    /// Iterate operators in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ConditionOperator>> {
        self.operators.iter()
    }

    /// All operator ids, in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.operators.iter().map(|op| op.operator_id()).collect()
    }

    /// Number of operators in the set
    pub fn len(&self) -> usize {
        self.operators.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }
}

impl std::fmt::Debug for OperatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorSet").field("ids", &self.ids()).finish()
    }
}

/// Borrow the plain stored value, erroring if the operator has none
pub(crate) fn plain_value<'a>(
    condition_value: &'a ConditionValue,
    operator_id: &str,
) -> Result<&'a Value> {
    match condition_value {
        ConditionValue::Plain(v) => Ok(v),
        _ => Err(ConditionError::InvalidOperation(format!(
            "operator '{}' expected a stored value",
            operator_id
        ))),
    }
}

/// Borrow the stored value as a string
pub(crate) fn string_value<'a>(
    condition_value: &'a ConditionValue,
    operator_id: &str,
) -> Result<&'a str> {
    plain_value(condition_value, operator_id)?
        .as_str()
        .ok_or_else(|| {
            ConditionError::InvalidOperation(format!(
                "operator '{}' expected a stored string value",
                operator_id
            ))
        })
}

/// Borrow the stored value as an array
pub(crate) fn list_value<'a>(
    condition_value: &'a ConditionValue,
    operator_id: &str,
) -> Result<&'a [Value]> {
    plain_value(condition_value, operator_id)?
        .as_array()
        .ok_or_else(|| {
            ConditionError::InvalidOperation(format!(
                "operator '{}' expected a stored list value",
                operator_id
            ))
        })
}

/// Borrow the match value as a string, erroring on incompatible types
pub(crate) fn match_str<'a>(match_value: &'a Value, operator_id: &str) -> Result<&'a str> {
    match_value.as_str().ok_or_else(|| {
        ConditionError::InvalidOperation(format!(
            "operator '{}' cannot be applied to a {} match value",
            operator_id,
            match_value.type_name()
        ))
    })
}
