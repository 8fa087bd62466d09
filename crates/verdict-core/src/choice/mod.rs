//! Choice framework
//!
//! A choice maps a domain concept (branch, owner, affected files, ...) onto
//! how to pull a match value out of an evaluation context and which operators
//! are legal against it. Choices are generic over the context type `C` that
//! the owning application evaluates against.

use std::collections::HashMap;

use crate::error::Result;
use crate::operators::OperatorSet;
use crate::types::{Value, ValueKind};

/// How a condition applies its operator to the choice's match value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Apply the operator to the match value as-is
    #[default]
    Whole,

    /// Apply the operator per item of an array match value; the condition
    /// matches if any item matches. An empty array never matches.
    AnyItem,

    /// Apply the operator per item of an array match value; the condition
    /// matches only if every item matches. An empty array vacuously matches.
    AllItems,
}

/// Which universe a queryable choice should enumerate
///
/// Validation lookups feed configuration UIs and are filtered to what the
/// acting user may choose from. Matching lookups run against already-existing
/// data and are scoped by tenant only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Access-control-filtered universe for a specific acting user
    Validation { acting_user: String },

    /// Tenant-scoped universe, ignoring per-user access rights
    Matching,
}

/// Per-evaluation scratch cache for derived match values
///
/// One `MatchState` is allocated per `ConditionSet::matches` call and threaded
/// through every choice's `get_match_value`, so several conditions built on
/// the same expensive derivation (a diff file listing, say) compute it once.
#[derive(Debug, Default)]
pub struct MatchState {
    values: HashMap<String, Value>,
}

impl MatchState {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Look up a cached value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Store a derived value
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Return the cached value for `key`, running `compute` at most once per
    /// evaluation to fill it.
    pub fn cached_or_compute<F>(&mut self, key: &str, compute: F) -> Result<Value>
    where
        F: FnOnce() -> Result<Value>,
    {
        if let Some(value) = self.values.get(key) {
            tracing::debug!("match state cache hit for '{}'", key);
            return Ok(value.clone());
        }

        let value = compute()?;
        self.values.insert(key.to_string(), value.clone());
        Ok(value)
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A named, typed accessor that derives a match value from a context
pub trait ConditionChoice<C>: Send + Sync {
    /// Unique id within a `ConditionChoices` registry
    fn choice_id(&self) -> &str;

    /// Display label
    fn name(&self) -> &str;

    /// Operators that may be used with this choice
    fn operators(&self) -> &OperatorSet;

    /// Default stored-value kind for operators that don't override it
    fn default_value_kind(&self) -> Option<ValueKind> {
        None
    }

    /// Derive the match value from the context.
    ///
    /// Must not mutate the context; may read and write `state` to share
    /// expensive derivations with other conditions in the same evaluation.
    fn get_match_value(&self, context: &C, state: &mut MatchState) -> Result<Value>;

    /// How operators are applied to this choice's match value
    fn match_mode(&self) -> MatchMode {
        MatchMode::Whole
    }

    /// Enumerate the universe of valid stored values, if this choice has one.
    ///
    /// Returns `None` for free-form choices (text fields). Queryable choices
    /// scope the universe by the lookup mode.
    fn valid_values(&self, _lookup: &Lookup) -> Option<Result<Vec<Value>>> {
        None
    }
}
