//! Choice registry
//!
//! A `ConditionChoices` collects the choices available in one domain (review
//! requests, say). It preserves insertion order for stable UI presentation
//! and supports runtime registration and unregistration so plugins can add
//! choices without touching the standard set. Registration is explicit; there
//! is no reflection or entry-point loading.

use std::sync::Arc;

use crate::choice::ConditionChoice;
use crate::error::{ConditionError, Result};

/// Ordered, id-keyed collection of choices for one domain
pub struct ConditionChoices<C> {
    choices: Vec<Arc<dyn ConditionChoice<C>>>,
}

impl<C> ConditionChoices<C> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            choices: Vec::new(),
        }
    }

    /// Add a choice at the end of the registry, rejecting duplicate ids
    pub fn register(&mut self, choice: Arc<dyn ConditionChoice<C>>) -> Result<()> {
        if self.contains(choice.choice_id()) {
            return Err(ConditionError::DuplicateChoice {
                choice_id: choice.choice_id().to_string(),
            });
        }

        tracing::debug!("registered condition choice '{}'", choice.choice_id());
        self.choices.push(choice);
        Ok(())
    }

    /// Remove a choice by id, returning it
    pub fn unregister(&mut self, choice_id: &str) -> Result<Arc<dyn ConditionChoice<C>>> {
        let index = self
            .choices
            .iter()
            .position(|c| c.choice_id() == choice_id)
            .ok_or_else(|| ConditionError::UnknownChoice {
                choice_id: choice_id.to_string(),
            })?;

        tracing::debug!("unregistered condition choice '{}'", choice_id);
        Ok(self.choices.remove(index))
    }

    /// Look up a choice by id
    pub fn get(&self, choice_id: &str) -> Option<&Arc<dyn ConditionChoice<C>>> {
        self.choices.iter().find(|c| c.choice_id() == choice_id)
    }

    /// Look up a choice by id, or fail with `UnknownChoice`
    pub fn get_or_err(&self, choice_id: &str) -> Result<&Arc<dyn ConditionChoice<C>>> {
        self.get(choice_id)
            .ok_or_else(|| ConditionError::UnknownChoice {
                choice_id: choice_id.to_string(),
            })
    }

    /// Whether a choice with this id is registered
    pub fn contains(&self, choice_id: &str) -> bool {
        self.get(choice_id).is_some()
    }

    /// Iterate choices in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ConditionChoice<C>>> {
        self.choices.iter()
    }

    /// All choice ids, in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.choices.iter().map(|c| c.choice_id()).collect()
    }

    /// Number of registered choices
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

impl<C> Default for ConditionChoices<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for ConditionChoices<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionChoices")
            .field("ids", &self.ids())
            .finish()
    }
}
