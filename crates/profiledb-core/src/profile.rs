use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Largest float that still renders exactly as an integer.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// A single spreadsheet cell, reduced to the shapes the normalizer cares about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// `true` for empty cells and whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as trimmed text, or `None` when blank.
    ///
    /// Integral floats render without a fractional part so numeric IDs and
    /// phone numbers survive the trip through a spreadsheet.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Float(f) => Some(float_to_text(*f)),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }

    /// Interpret the cell as a non-negative count.
    ///
    /// Negative, fractional, and non-numeric values yield `None`.
    #[must_use]
    pub fn as_count(&self) -> Option<i64> {
        let value = match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) => float_to_int(*f),
            CellValue::Text(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_int))
            }
            CellValue::Empty | CellValue::Bool(_) => None,
        };
        value.filter(|v| *v >= 0)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

#[allow(clippy::cast_possible_truncation)]
fn float_to_int(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT {
        Some(f as i64)
    } else {
        None
    }
}

fn float_to_text(f: f64) -> String {
    float_to_int(f).map_or_else(|| f.to_string(), |i| i.to_string())
}

/// One data row of the uploaded sheet, keyed by header text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 1-based row number in the sheet, header included.
    pub row_number: usize,
    cells: HashMap<String, CellValue>,
}

impl RawRow {
    #[must_use]
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            cells: HashMap::new(),
        }
    }

    pub fn insert(&mut self, header: impl Into<String>, value: CellValue) {
        self.cells.insert(header.into(), value);
    }

    #[must_use]
    pub fn with(mut self, header: &str, value: impl Into<CellValue>) -> Self {
        self.insert(header, value.into());
        self
    }

    #[must_use]
    pub fn get(&self, header: &str) -> Option<&CellValue> {
        self.cells.get(header)
    }

    /// `true` when every cell is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.cells.values().all(CellValue::is_blank)
    }
}

/// A boolean column after `YES`/`NO` coercion.
///
/// Anything outside the coercion table is carried through untouched as
/// [`Flag::Raw`]; it is up to the storage layer to decide what to keep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Value(bool),
    Raw(CellValue),
}

impl Flag {
    /// The value that can be stored in a boolean column.
    ///
    /// A native boolean cell that leaked through counts; anything else is `None`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Flag::Value(b) | Flag::Raw(CellValue::Bool(b)) => Some(*b),
            Flag::Raw(_) => None,
        }
    }

    /// `true` when the original cell held something other than blank or a boolean.
    #[must_use]
    pub fn is_leaked(&self) -> bool {
        match self {
            Flag::Value(_) | Flag::Raw(CellValue::Bool(_)) => false,
            Flag::Raw(raw) => !raw.is_blank(),
        }
    }
}

/// A normalized profile candidate, ready for reconciliation against storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfile {
    pub external_id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub profile_url: Option<String>,
    pub avatar_url: Option<String>,
    pub followed_by_viewer: Flag,
    pub is_verified: Flag,
    pub followers_count: Option<i64>,
    pub following_count: Option<i64>,
    pub biography: Option<String>,
    pub public_email: Option<String>,
    pub posts_count: Option<i64>,
    pub phone_country_code: Option<String>,
    pub phone_number: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub is_private: Flag,
    pub is_business: Flag,
    pub external_url: Option<String>,
}

impl NewProfile {
    /// A candidate carrying only the identity fields.
    #[must_use]
    pub fn minimal(external_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
            username: username.into(),
            full_name: None,
            profile_url: None,
            avatar_url: None,
            followed_by_viewer: Flag::Raw(CellValue::Empty),
            is_verified: Flag::Raw(CellValue::Empty),
            followers_count: None,
            following_count: None,
            biography: None,
            public_email: None,
            posts_count: None,
            phone_country_code: None,
            phone_number: None,
            city: None,
            address: None,
            is_private: Flag::Raw(CellValue::Empty),
            is_business: Flag::Raw(CellValue::Empty),
            external_url: None,
        }
    }

    /// Names of boolean columns whose value could not be coerced.
    #[must_use]
    pub fn leaked_flags(&self) -> Vec<&'static str> {
        [
            ("followed_by_viewer", &self.followed_by_viewer),
            ("is_verified", &self.is_verified),
            ("is_private", &self.is_private),
            ("is_business", &self.is_business),
        ]
        .into_iter()
        .filter(|(_, flag)| flag.is_leaked())
        .map(|(name, _)| name)
        .collect()
    }
}
