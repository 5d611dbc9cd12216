//! `ingest` command: the upload workflow run against a local file.

use std::path::Path;

use anyhow::Context;
use profiledb_core::RawRow;
use profiledb_db::PgProfileStore;
use profiledb_ingest::{normalize_rows, run_upload, SkippedRow, UploadSummary};

/// Validate the extension and parse `path` off the async runtime.
async fn read_sheet(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("not a file path: {}", path.display()))?;
    profiledb_sheet::validate_extension(file_name)?;

    let owned = path.to_path_buf();
    let rows = tokio::task::spawn_blocking(move || profiledb_sheet::read_rows_from_path(&owned))
        .await?
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "read spreadsheet");
    Ok(rows)
}

/// Parse and reconcile `path` against the database, then print the summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or storage fails.
pub(crate) async fn run_ingest(pool: &sqlx::PgPool, path: &Path) -> anyhow::Result<()> {
    let rows = read_sheet(path).await?;
    let store = PgProfileStore::new(pool.clone());
    let summary = run_upload(&store, rows).await?;
    print_summary(&summary);
    Ok(())
}

/// Parse and normalize `path` and report what an upload would consider.
/// No storage is touched, so duplicates cannot be known.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub(crate) async fn run_ingest_dry_run(path: &Path) -> anyhow::Result<()> {
    let rows = read_sheet(path).await?;
    let total = rows.len();
    let (valid, rejected) = normalize_rows(&rows);

    println!("[dry-run] {total} row(s) read, {} valid", valid.len());
    for profile in &valid {
        println!("  would consider {}", profile.username);
    }
    print_skipped(&rejected.iter().map(SkippedRow::from).collect::<Vec<_>>());
    Ok(())
}

fn print_summary(summary: &UploadSummary) {
    println!("{}", summary.message());
    println!(
        "rows: {} read, {} valid, {} inserted, {} duplicate, {} conflicted, {} skipped",
        summary.total_rows,
        summary.valid_rows,
        summary.inserted_count,
        summary.duplicates.len(),
        summary.conflicted.len(),
        summary.skipped.len()
    );
    if !summary.conflicted.is_empty() {
        println!("conflicted: {}", summary.conflicted.join(", "));
    }
    print_skipped(&summary.skipped);
}

fn print_skipped(skipped: &[SkippedRow]) {
    for row in skipped {
        println!("  row {:>5}  {:<18} {}", row.row_number, row.reason, row.message);
    }
}
