use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("unsupported file \"{file_name}\": expected an .xlsx spreadsheet")]
    UnsupportedExtension { file_name: String },

    #[error("failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::XlsxError),

    #[error("spreadsheet has no sheets")]
    NoSheets,

    #[error("failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),

    #[error("spreadsheet parsing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl SheetError {
    /// `true` when the payload itself is at fault rather than the server.
    #[must_use]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            SheetError::UnsupportedExtension { .. } | SheetError::Parse(_) | SheetError::NoSheets
        )
    }
}
