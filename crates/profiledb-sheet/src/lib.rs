//! Spreadsheet ingestion: extension checks, optional disk staging, and
//! first-sheet parsing into [`profiledb_core::RawRow`]s via calamine.

pub mod error;
pub mod reader;
pub mod upload;

pub use error::SheetError;
pub use reader::{read_rows_from_bytes, read_rows_from_path};
pub use upload::{parse_upload, stage_upload, validate_extension, ACCEPTED_EXTENSION};
