//! Domain types and pure logic shared by every profiledb crate.
//!
//! Nothing in here performs I/O: spreadsheet parsing lives in
//! `profiledb-sheet`, persistence in `profiledb-db`, and the workflow that
//! ties them together in `profiledb-ingest`.

pub mod app_config;
pub mod config;
pub mod error;
pub mod normalize;
pub mod profile;
pub mod store;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use normalize::{coerce_flag, columns, normalize_row, RowValidationError, FLAG_TABLE};
pub use profile::{CellValue, Flag, NewProfile, RawRow};
pub use store::{ProfileStore, StoreError};
