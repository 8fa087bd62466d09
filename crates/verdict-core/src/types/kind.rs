//! Shape validation for stored condition values
//!
//! Every operator that takes a stored value declares (directly or through its
//! owning choice) the kind of value it accepts. Validation happens once, when
//! a condition is constructed or deserialized; evaluation assumes the stored
//! value is already well-formed.

use crate::error::{ConditionError, Result};
use crate::types::Value;

/// Expected shape of a stored condition value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// Any non-null value
    Any,
    /// A string
    String,
    /// An array of strings
    StringList,
    /// A string holding a compilable regular expression
    Regex,
}

impl ValueKind {
    /// Check that `value` has this kind's shape.
    ///
    /// For `Regex` the pattern is compiled and discarded; condition
    /// construction compiles it once more and keeps the compiled form.
    pub fn validate(&self, value: &Value) -> Result<()> {
        match self {
            ValueKind::Any => match value {
                Value::Null => Err(ConditionError::InvalidConditionValue {
                    expected: "a non-null value",
                    actual: value.type_name().to_string(),
                }),
                _ => Ok(()),
            },
            ValueKind::String => match value {
                Value::String(_) => Ok(()),
                _ => Err(ConditionError::InvalidConditionValue {
                    expected: "a string",
                    actual: value.type_name().to_string(),
                }),
            },
            ValueKind::StringList => match value {
                Value::Array(items) if items.iter().all(|v| matches!(v, Value::String(_))) => {
                    Ok(())
                }
                _ => Err(ConditionError::InvalidConditionValue {
                    expected: "an array of strings",
                    actual: value.type_name().to_string(),
                }),
            },
            ValueKind::Regex => {
                let pattern = value
                    .as_str()
                    .ok_or_else(|| ConditionError::InvalidConditionValue {
                        expected: "a regex pattern string",
                        actual: value.type_name().to_string(),
                    })?;

                regex::Regex::new(pattern)
                    .map(|_| ())
                    .map_err(|e| ConditionError::InvalidRegex {
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    })
            }
        }
    }
}
