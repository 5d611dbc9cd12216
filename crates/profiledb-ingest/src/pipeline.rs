//! Upload pipeline orchestration.

use std::collections::HashMap;

use profiledb_core::{normalize_row, NewProfile, ProfileStore, RawRow, RowValidationError};

use crate::error::IngestError;
use crate::reconcile::reconcile;
use crate::types::{SkippedRow, UploadSummary};

/// Normalize every row independently.
///
/// A row that fails validation is returned in the second vector and does not
/// affect the others. A row whose username repeats an earlier valid row of
/// the same upload is rejected as [`RowValidationError::RepeatedUsername`].
#[must_use]
pub fn normalize_rows(rows: &[RawRow]) -> (Vec<NewProfile>, Vec<RowValidationError>) {
    let mut valid: Vec<NewProfile> = Vec::with_capacity(rows.len());
    let mut rejected: Vec<RowValidationError> = Vec::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let profile = match normalize_row(row) {
            Ok(profile) => profile,
            Err(err) => {
                rejected.push(err);
                continue;
            }
        };

        if let Some(&first_row) = first_seen.get(&profile.username) {
            rejected.push(RowValidationError::RepeatedUsername {
                row_number: row.row_number,
                username: profile.username,
                first_row,
            });
            continue;
        }

        first_seen.insert(profile.username.clone(), row.row_number);
        valid.push(profile);
    }

    (valid, rejected)
}

/// Run normalization and reconciliation for one parsed upload.
///
/// # Errors
///
/// Returns [`IngestError`] if storage is unreachable or the batch insert
/// fails. Row-level problems never fail the upload; they are reported in
/// [`UploadSummary::skipped`].
pub async fn run_upload<S>(store: &S, rows: Vec<RawRow>) -> Result<UploadSummary, IngestError>
where
    S: ProfileStore + ?Sized,
{
    let total_rows = rows.len();
    let (valid, rejected) = normalize_rows(&rows);
    drop(rows);

    for err in &rejected {
        tracing::warn!(row = err.row_number(), reason = err.code(), "skipping row: {err}");
    }
    for profile in &valid {
        let leaked = profile.leaked_flags();
        if !leaked.is_empty() {
            tracing::warn!(
                username = %profile.username,
                columns = ?leaked,
                "non YES/NO value in boolean column; stored as null"
            );
        }
    }

    let valid_rows = valid.len();
    let outcome = reconcile(store, valid).await?;

    tracing::info!(
        total_rows,
        valid_rows,
        inserted = outcome.inserted.len(),
        duplicates = outcome.duplicates.len(),
        conflicted = outcome.conflicted.len(),
        skipped = rejected.len(),
        "upload reconciled"
    );

    Ok(UploadSummary {
        total_rows,
        valid_rows,
        inserted_count: outcome.inserted.len(),
        inserted: outcome.inserted,
        duplicates: outcome.duplicates,
        conflicted: outcome.conflicted,
        skipped: rejected.iter().map(SkippedRow::from).collect(),
    })
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
