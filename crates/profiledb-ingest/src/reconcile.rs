//! Reconciliation of normalized candidates against stored profiles.

use std::collections::HashSet;

use profiledb_core::{NewProfile, ProfileStore};

use crate::error::IngestError;

/// Candidates split by whether their username is already stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub new: Vec<NewProfile>,
    pub duplicate: Vec<NewProfile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub inserted: Vec<String>,
    pub duplicates: Vec<String>,
    pub conflicted: Vec<String>,
}

/// Split `candidates` into new and duplicate by username.
///
/// Order is preserved within each side. A username repeated within
/// `candidates` is new only on its first occurrence.
#[must_use]
pub fn partition(candidates: Vec<NewProfile>, existing: &HashSet<String>) -> Partition {
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    let mut out = Partition::default();

    for candidate in candidates {
        if existing.contains(&candidate.username) || !seen.insert(candidate.username.clone()) {
            out.duplicate.push(candidate);
        } else {
            out.new.push(candidate);
        }
    }

    out
}

/// Persist exactly the candidates whose username is not yet stored.
///
/// 1. Look up which candidate usernames already exist.
/// 2. Partition into new and duplicate.
/// 3. If nothing is new, return without writing; otherwise insert the new
///    set in one batch.
///
/// The lookup and the insert are not atomic. A username that another upload
/// stores in between is skipped by the store and reported in
/// [`ReconcileOutcome::conflicted`] instead of failing the batch.
///
/// # Errors
///
/// Returns [`IngestError`] if the lookup or the insert fails. No retries.
pub async fn reconcile<S>(
    store: &S,
    candidates: Vec<NewProfile>,
) -> Result<ReconcileOutcome, IngestError>
where
    S: ProfileStore + ?Sized,
{
    if candidates.is_empty() {
        return Ok(ReconcileOutcome::default());
    }

    let usernames: Vec<String> = candidates.iter().map(|c| c.username.clone()).collect();
    let existing = store.existing_usernames(&usernames).await?;

    let Partition { new, duplicate } = partition(candidates, &existing);
    let duplicates: Vec<String> = duplicate.into_iter().map(|p| p.username).collect();

    if !duplicates.is_empty() {
        tracing::debug!(count = duplicates.len(), usernames = ?duplicates, "skipping stored usernames");
    }

    if new.is_empty() {
        return Ok(ReconcileOutcome {
            inserted: Vec::new(),
            duplicates,
            conflicted: Vec::new(),
        });
    }

    let stored: HashSet<String> = store.insert_new(&new).await?.into_iter().collect();

    let (inserted, conflicted): (Vec<String>, Vec<String>) = new
        .into_iter()
        .map(|p| p.username)
        .partition(|username| stored.contains(username));

    if !conflicted.is_empty() {
        tracing::warn!(
            count = conflicted.len(),
            usernames = ?conflicted,
            "usernames stored concurrently between lookup and insert; skipped"
        );
    }

    Ok(ReconcileOutcome {
        inserted,
        duplicates,
        conflicted,
    })
}
