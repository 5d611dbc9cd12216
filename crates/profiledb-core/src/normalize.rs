//! Mapping from a spreadsheet row to a [`NewProfile`].
//!
//! The column table is fixed; columns not listed in [`columns`] are ignored.

use thiserror::Error;

use crate::profile::{CellValue, Flag, NewProfile, RawRow};

/// Spreadsheet header text for every mapped column.
pub mod columns {
    pub const EXTERNAL_ID: &str = "Instagram ID";
    pub const USERNAME: &str = "Username";
    pub const FULL_NAME: &str = "Full name";
    pub const PROFILE_URL: &str = "Profile link";
    pub const AVATAR_URL: &str = "Avatar pic";
    pub const FOLLOWED_BY_VIEWER: &str = "Followed by viewer";
    pub const IS_VERIFIED: &str = "Is verified";
    pub const FOLLOWERS_COUNT: &str = "Followers count";
    pub const FOLLOWING_COUNT: &str = "Following count";
    pub const BIOGRAPHY: &str = "Biography";
    pub const PUBLIC_EMAIL: &str = "Public email";
    pub const POSTS_COUNT: &str = "Posts count";
    pub const PHONE_COUNTRY_CODE: &str = "Phone country code";
    pub const PHONE_NUMBER: &str = "Phone number";
    pub const CITY: &str = "City";
    pub const ADDRESS: &str = "Address";
    pub const IS_PRIVATE: &str = "Is private";
    pub const IS_BUSINESS: &str = "Is business";
    pub const EXTERNAL_URL: &str = "External url";
}

/// Every textual sentinel the boolean columns understand. Matching is exact.
pub const FLAG_TABLE: [(&str, bool); 2] = [("YES", true), ("NO", false)];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowValidationError {
    #[error("row {row_number}: missing required column '{column}'")]
    MissingField {
        row_number: usize,
        column: &'static str,
    },

    #[error("row {row_number}: username '{username}' already appears in row {first_row}")]
    RepeatedUsername {
        row_number: usize,
        username: String,
        first_row: usize,
    },
}

impl RowValidationError {
    #[must_use]
    pub fn row_number(&self) -> usize {
        match self {
            RowValidationError::MissingField { row_number, .. }
            | RowValidationError::RepeatedUsername { row_number, .. } => *row_number,
        }
    }

    /// Stable machine-readable reason, used in API responses.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            RowValidationError::MissingField { .. } => "missing_field",
            RowValidationError::RepeatedUsername { .. } => "repeated_username",
        }
    }
}

/// Coerce a boolean column through [`FLAG_TABLE`], passing anything else through.
#[must_use]
pub fn coerce_flag(value: &CellValue) -> Flag {
    if let CellValue::Text(text) = value {
        let hit = FLAG_TABLE
            .iter()
            .find(|(sentinel, _)| *sentinel == text.as_str());
        if let Some((_, b)) = hit {
            return Flag::Value(*b);
        }
    }
    Flag::Raw(value.clone())
}

/// Normalize one row into a profile candidate.
///
/// # Errors
///
/// Returns [`RowValidationError::MissingField`] when the row has no value for
/// the external-ID or username column.
pub fn normalize_row(row: &RawRow) -> Result<NewProfile, RowValidationError> {
    let text = |column: &str| row.get(column).and_then(CellValue::as_text);
    let count = |column: &str| row.get(column).and_then(CellValue::as_count);
    let flag = |column: &str| {
        row.get(column)
            .map_or(Flag::Raw(CellValue::Empty), coerce_flag)
    };

    let require = |column: &'static str| {
        text(column).ok_or(RowValidationError::MissingField {
            row_number: row.row_number,
            column,
        })
    };

    let external_id = require(columns::EXTERNAL_ID)?;
    let username = require(columns::USERNAME)?;

    Ok(NewProfile {
        external_id,
        username,
        full_name: text(columns::FULL_NAME),
        profile_url: text(columns::PROFILE_URL),
        avatar_url: text(columns::AVATAR_URL),
        followed_by_viewer: flag(columns::FOLLOWED_BY_VIEWER),
        is_verified: flag(columns::IS_VERIFIED),
        followers_count: count(columns::FOLLOWERS_COUNT),
        following_count: count(columns::FOLLOWING_COUNT),
        biography: text(columns::BIOGRAPHY),
        public_email: text(columns::PUBLIC_EMAIL),
        posts_count: count(columns::POSTS_COUNT),
        phone_country_code: text(columns::PHONE_COUNTRY_CODE),
        phone_number: text(columns::PHONE_NUMBER),
        city: text(columns::CITY),
        address: text(columns::ADDRESS),
        is_private: flag(columns::IS_PRIVATE),
        is_business: flag(columns::IS_BUSINESS),
        external_url: text(columns::EXTERNAL_URL),
    })
}
