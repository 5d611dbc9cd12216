use profiledb_core::RowValidationError;
use serde::Serialize;

/// A sheet row that never reached reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub row_number: usize,
    pub reason: &'static str,
    pub message: String,
}

impl From<&RowValidationError> for SkippedRow {
    fn from(err: &RowValidationError) -> Self {
        Self {
            row_number: err.row_number(),
            reason: err.code(),
            message: err.to_string(),
        }
    }
}

/// Result of one upload, returned to the caller as the response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadSummary {
    /// Non-blank data rows read from the sheet.
    pub total_rows: usize,
    /// Rows that passed normalization.
    pub valid_rows: usize,
    pub inserted_count: usize,
    pub inserted: Vec<String>,
    /// Usernames already stored before this upload; left untouched.
    pub duplicates: Vec<String>,
    /// Usernames that were new at lookup time but stored by a concurrent
    /// upload before this batch was written.
    pub conflicted: Vec<String>,
    pub skipped: Vec<SkippedRow>,
}

impl UploadSummary {
    #[must_use]
    pub fn message(&self) -> &'static str {
        if self.valid_rows == 0 {
            "No valid rows found in the uploaded sheet."
        } else if !self.conflicted.is_empty() {
            "File uploaded; some records were stored concurrently by another upload and were skipped."
        } else if self.inserted.is_empty() {
            "No new data to insert. All records are duplicates."
        } else {
            "File uploaded and unique data saved to database."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_row_carries_reason_code() {
        let err = RowValidationError::MissingField {
            row_number: 3,
            column: "Username",
        };
        let skipped = SkippedRow::from(&err);
        assert_eq!(skipped.row_number, 3);
        assert_eq!(skipped.reason, "missing_field");
        assert!(skipped.message.contains("Username"));
    }

    #[test]
    fn message_reflects_outcome() {
        let mut summary = UploadSummary::default();
        assert_eq!(summary.message(), "No valid rows found in the uploaded sheet.");

        summary.valid_rows = 2;
        summary.duplicates = vec!["a".into(), "b".into()];
        assert_eq!(
            summary.message(),
            "No new data to insert. All records are duplicates."
        );

        summary.inserted = vec!["c".into()];
        assert_eq!(
            summary.message(),
            "File uploaded and unique data saved to database."
        );

        summary.conflicted = vec!["d".into()];
        assert!(summary.message().contains("concurrently"));
    }

    #[test]
    fn summary_serializes_with_snake_case_fields() {
        let summary = UploadSummary {
            total_rows: 1,
            valid_rows: 1,
            inserted_count: 1,
            inserted: vec!["jane".into()],
            ..UploadSummary::default()
        };
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["inserted_count"], 1);
        assert_eq!(json["inserted"][0], "jane");
        assert!(json["skipped"].as_array().expect("array").is_empty());
    }
}
