//! Error types for review-domain collaborators

use thiserror::Error;

/// Error from a backing data store
#[derive(Error, Debug)]
pub enum StoreError {
    /// A lookup against the store failed
    #[error("Store lookup failed: {0}")]
    Lookup(String),

    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
