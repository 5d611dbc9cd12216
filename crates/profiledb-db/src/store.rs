//! [`ProfileStore`] backed by the Postgres pool.

use std::collections::HashSet;

use async_trait::async_trait;
use profiledb_core::{NewProfile, ProfileStore, StoreError};
use sqlx::PgPool;

use crate::profiles::{find_existing_usernames, insert_profiles_skip_existing};
use crate::DbError;

/// Cheap to clone; clones share the underlying pool.
#[derive(Debug, Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn classify(error: &DbError, otherwise: fn(String) -> StoreError) -> StoreError {
    if error.is_connection_error() {
        StoreError::Connection(error.to_string())
    } else {
        otherwise(error.to_string())
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn existing_usernames(&self, usernames: &[String]) -> Result<HashSet<String>, StoreError> {
        find_existing_usernames(&self.pool, usernames)
            .await
            .map_err(|e| classify(&e, StoreError::Query))
    }

    async fn insert_new(&self, profiles: &[NewProfile]) -> Result<Vec<String>, StoreError> {
        insert_profiles_skip_existing(&self.pool, profiles)
            .await
            .map_err(|e| classify(&e, StoreError::Write))
    }
}
