//! Upload handling: declared-extension check, optional disk staging, and
//! parsing off the async runtime.

use std::path::{Path, PathBuf};

use chrono::Utc;
use profiledb_core::RawRow;
use uuid::Uuid;

use crate::error::SheetError;
use crate::reader::{read_rows_from_bytes, read_rows_from_path};

/// The only spreadsheet format accepted for upload.
pub const ACCEPTED_EXTENSION: &str = "xlsx";

/// Reject any file whose declared name does not end in `.xlsx`.
///
/// # Errors
///
/// Returns [`SheetError::UnsupportedExtension`] on mismatch.
pub fn validate_extension(file_name: &str) -> Result<(), SheetError> {
    let accepted = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ACCEPTED_EXTENSION));

    if accepted {
        Ok(())
    } else {
        Err(SheetError::UnsupportedExtension {
            file_name: file_name.to_string(),
        })
    }
}

/// Write an upload into `dir` under a collision-free name, creating `dir` if needed.
///
/// Names are `<unix-millis>-<8 hex chars>.xlsx`. The file is left in place
/// after parsing.
///
/// # Errors
///
/// Returns [`SheetError::Staging`] if the directory or file cannot be written.
pub async fn stage_upload(dir: &Path, bytes: &[u8]) -> Result<PathBuf, SheetError> {
    tokio::fs::create_dir_all(dir).await?;

    let suffix = Uuid::new_v4().simple().to_string();
    let file_name = format!(
        "{}-{}.{ACCEPTED_EXTENSION}",
        Utc::now().timestamp_millis(),
        &suffix[..8]
    );
    let path = dir.join(file_name);
    tokio::fs::write(&path, bytes).await?;

    tracing::debug!(path = %path.display(), bytes = bytes.len(), "staged upload");
    Ok(path)
}

/// Validate and parse an uploaded spreadsheet.
///
/// The extension is checked before anything is written or parsed. With a
/// `staging_dir` the payload is written to disk and parsed from there;
/// otherwise it is parsed from memory.
///
/// # Errors
///
/// Returns [`SheetError`]; use [`SheetError::is_format_error`] to tell a bad
/// payload from a server-side failure.
pub async fn parse_upload(
    file_name: &str,
    bytes: Vec<u8>,
    staging_dir: Option<&Path>,
) -> Result<Vec<RawRow>, SheetError> {
    validate_extension(file_name)?;

    match staging_dir {
        Some(dir) => {
            let path = stage_upload(dir, &bytes).await?;
            tokio::task::spawn_blocking(move || read_rows_from_path(&path)).await?
        }
        None => tokio::task::spawn_blocking(move || read_rows_from_bytes(&bytes)).await?,
    }
}
