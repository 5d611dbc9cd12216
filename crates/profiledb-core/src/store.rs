//! The storage seam the ingestion workflow is written against.

use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;

use crate::profile::NewProfile;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached; nothing was written.
    #[error("storage unavailable: {0}")]
    Connection(String),

    #[error("storage query failed: {0}")]
    Query(String),

    #[error("storage write failed: {0}")]
    Write(String),
}

/// Profile persistence used by the upload workflow.
///
/// Implementations own their connection lifecycle; callers only borrow a handle.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Return the subset of `usernames` that is already stored.
    async fn existing_usernames(&self, usernames: &[String]) -> Result<HashSet<String>, StoreError>;

    /// Insert `profiles` in one batch, skipping any whose username is already
    /// stored, and return the usernames that were actually inserted.
    async fn insert_new(&self, profiles: &[NewProfile]) -> Result<Vec<String>, StoreError>;
}
