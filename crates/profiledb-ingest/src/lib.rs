//! The upload workflow: normalize spreadsheet rows, reconcile them against
//! stored profiles by username, and batch-insert only the new ones.
//!
//! Storage is injected as a [`profiledb_core::ProfileStore`]; this crate never
//! opens connections itself.

pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod types;

pub use error::IngestError;
pub use pipeline::{normalize_rows, run_upload};
pub use reconcile::{partition, reconcile, Partition, ReconcileOutcome};
pub use types::{SkippedRow, UploadSummary};
