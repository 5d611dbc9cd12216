use profiledb_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("storage unavailable: {0}")]
    StorageConnection(String),

    #[error("existing-profile lookup failed: {0}")]
    StorageQuery(String),

    #[error(
        "batch insert failed: {0}; profiles stored before this upload are unchanged and nothing is rolled back"
    )]
    StorageWrite(String),
}

impl From<StoreError> for IngestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Connection(msg) => IngestError::StorageConnection(msg),
            StoreError::Query(msg) => IngestError::StorageQuery(msg),
            StoreError::Write(msg) => IngestError::StorageWrite(msg),
        }
    }
}
