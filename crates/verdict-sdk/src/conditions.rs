//! Condition loading and matching against stored settings
//!
//! Settings are a string-keyed map of JSON values; the condition set lives
//! under one key (`CONDITIONS_KEY` unless the caller chooses another).
//!
//! The error policy at this boundary, in both directions:
//! - configuration errors (malformed shape, unknown choice or operator ids,
//!   bad value types) are logged at error level with the raw data at debug
//!   level, and loading reports "no condition set";
//! - evaluation errors are logged and the result is `false`, so a bad stored
//!   condition cannot break the operation that asked whether it matched.

use std::collections::HashMap;

use verdict_core::{ConditionChoices, ConditionSet, SerializedConditionSet};

use crate::error::{Result, SdkError};

/// Default settings key for stored condition sets
pub const CONDITIONS_KEY: &str = "conditions";

/// Load the condition set stored under `key`, propagating errors.
///
/// Returns `Ok(None)` when nothing is stored under the key. Malformed data
/// and unresolvable ids are errors; most callers want the logging, swallowing
/// wrapper `load_conditions` instead.
pub fn try_load_conditions<C>(
    choices: &ConditionChoices<C>,
    settings: &HashMap<String, serde_json::Value>,
    key: &str,
) -> Result<Option<ConditionSet<C>>> {
    let raw = match settings.get(key) {
        None => return Ok(None),
        Some(serde_json::Value::Null) => return Ok(None),
        Some(raw) => raw,
    };

    let data: SerializedConditionSet = serde_json::from_value(raw.clone())
        .map_err(|e| SdkError::ConfigError(format!("malformed condition data: {}", e)))?;

    Ok(Some(ConditionSet::deserialize(choices, &data)?))
}

/// Load the condition set stored under `key`, swallowing bad data.
///
/// Configuration errors are logged (raw data at debug level) and reported as
/// "no condition set", so one corrupted entry cannot take down the page or
/// pipeline that owns it.
pub fn load_conditions<C>(
    choices: &ConditionChoices<C>,
    settings: &HashMap<String, serde_json::Value>,
    key: &str,
) -> Option<ConditionSet<C>> {
    match try_load_conditions(choices, settings, key) {
        Ok(set) => set,
        Err(e) => {
            tracing::error!("Failed to load conditions under key '{}': {}", key, e);
            tracing::debug!(
                "Raw condition data under key '{}': {:?}",
                key,
                settings.get(key)
            );
            None
        }
    }
}

/// Evaluate the conditions stored under `key` against `context`.
///
/// No stored conditions means no restriction: the result is `true`. Stored
/// but unloadable conditions fail closed to `false`, as does any error raised
/// during evaluation.
pub fn match_conditions<C>(
    choices: &ConditionChoices<C>,
    settings: &HashMap<String, serde_json::Value>,
    key: &str,
    context: &C,
) -> bool {
    match settings.get(key) {
        None | Some(serde_json::Value::Null) => {
            tracing::debug!("No conditions stored under key '{}'; matching", key);
            return true;
        }
        Some(_) => {}
    }

    let Some(condition_set) = load_conditions(choices, settings, key) else {
        return false;
    };

    match condition_set.matches(context) {
        Ok(matched) => matched,
        Err(e) => {
            tracing::error!(
                "Error evaluating conditions under key '{}' ({:?} mode, {} conditions): {}; \
                 treating as non-matching",
                key,
                condition_set.mode(),
                condition_set.len(),
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use verdict_core::operators::{IsOperator, OperatorSet};
    use verdict_core::{ConditionChoice, MatchState, Value, ValueKind};

    type Fields = HashMap<String, Value>;

    struct FieldChoice {
        operators: OperatorSet,
    }

    impl FieldChoice {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                operators: OperatorSet::of(vec![Arc::new(IsOperator)]).unwrap(),
            })
        }
    }

    impl ConditionChoice<Fields> for FieldChoice {
        fn choice_id(&self) -> &str {
            "field"
        }

        fn name(&self) -> &str {
            "Field"
        }

        fn operators(&self) -> &OperatorSet {
            &self.operators
        }

        fn default_value_kind(&self) -> Option<ValueKind> {
            Some(ValueKind::String)
        }

        fn get_match_value(
            &self,
            context: &Fields,
            _state: &mut MatchState,
        ) -> verdict_core::Result<Value> {
            Ok(context.get("field").cloned().unwrap_or(Value::Null))
        }
    }

    fn registry() -> ConditionChoices<Fields> {
        let mut choices = ConditionChoices::new();
        choices.register(FieldChoice::new()).unwrap();
        choices
    }

    fn settings(json: &str) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert(
            CONDITIONS_KEY.to_string(),
            serde_json::from_str(json).unwrap(),
        );
        map
    }

    fn context(value: &str) -> Fields {
        let mut map = Fields::new();
        map.insert("field".to_string(), Value::String(value.to_string()));
        map
    }

    #[test]
    fn test_try_load_absent_key() {
        let choices = registry();
        let result = try_load_conditions(&choices, &HashMap::new(), CONDITIONS_KEY).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_try_load_null_value() {
        let choices = registry();
        let result =
            try_load_conditions(&choices, &settings("null"), CONDITIONS_KEY).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_try_load_malformed_shape() {
        let choices = registry();
        let err = try_load_conditions(
            &choices,
            &settings(r#"{"mode": "sometimes", "conditions": []}"#),
            CONDITIONS_KEY,
        )
        .unwrap_err();
        assert!(matches!(err, SdkError::ConfigError(_)));
    }

    #[test]
    fn test_try_load_unknown_choice() {
        let choices = registry();
        let err = try_load_conditions(
            &choices,
            &settings(r#"{"mode": "all", "conditions": [{"choice": "ghost", "op": "is", "value": "x"}]}"#),
            CONDITIONS_KEY,
        )
        .unwrap_err();
        assert!(matches!(err, SdkError::Condition(_)));
    }

    #[test]
    fn test_load_swallows_bad_data() {
        let choices = registry();
        let result = load_conditions(
            &choices,
            &settings(r#"{"mode": "all", "conditions": [{"choice": "ghost", "op": "is", "value": "x"}]}"#),
            CONDITIONS_KEY,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_match_with_no_conditions_is_unrestricted() {
        let choices = registry();
        assert!(match_conditions(
            &choices,
            &HashMap::new(),
            CONDITIONS_KEY,
            &context("x")
        ));
        assert!(match_conditions(
            &choices,
            &settings("null"),
            CONDITIONS_KEY,
            &context("x")
        ));
    }

    #[test]
    fn test_match_with_corrupt_conditions_fails_closed() {
        let choices = registry();
        assert!(!match_conditions(
            &choices,
            &settings(r#""not even an object""#),
            CONDITIONS_KEY,
            &context("x")
        ));
    }

    #[test]
    fn test_match_evaluates_stored_conditions() {
        let choices = registry();
        let stored = settings(
            r#"{"mode": "all", "conditions": [{"choice": "field", "op": "is", "value": "yes"}]}"#,
        );

        assert!(match_conditions(
            &choices,
            &stored,
            CONDITIONS_KEY,
            &context("yes")
        ));
        assert!(!match_conditions(
            &choices,
            &stored,
            CONDITIONS_KEY,
            &context("no")
        ));
    }
}
