//! Verdict SDK - Configuration boundary for condition matching
//!
//! Condition sets live inside larger stored configuration blobs (an
//! automation's settings, say) under a well-known key. This crate provides
//! the entry points callers use against those blobs, with the fail-closed
//! error policy: corrupted configuration is logged and never matches, and an
//! evaluation failure never propagates past the boundary into the business
//! operation that asked.

pub mod conditions;
pub mod config;
pub mod error;
pub mod loader;

// Re-export main types
pub use conditions::{load_conditions, match_conditions, try_load_conditions, CONDITIONS_KEY};
pub use config::AutomationConfig;
pub use error::{Result, SdkError};
pub use loader::ConfigLoader;
