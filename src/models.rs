use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One parsed dataset row. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub score: f64,
    pub score_phrase: String,
    pub platform: String,
    pub genre: String,
    pub release_year: i32,
    pub release_month: u32,
    pub release_day: u32,
}

/// One CSV row as it arrives from the wire, before field validation.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    pub title: String,
    pub score: String,
    pub score_phrase: String,
    pub platform: String,
    pub genre: String,
    pub release_year: String,
    pub release_month: String,
    pub release_day: String,
}

/// Why a row was dropped during parsing. Rows are skipped whole, never
/// partially constructed.
#[derive(Error, Debug, PartialEq)]
pub enum RowSkip {
    #[error("Skipping row {row}: invalid {field}: {value:?}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Skipping row {row}: {message}")]
    Malformed { row: usize, message: String },

    #[error("Skipping row {row}: forced error for coverage")]
    Injected { row: usize },
}

impl Record {
    /// Validates a raw row. An empty score defaults to 0.0; every other
    /// numeric field is required.
    pub fn from_raw(row: usize, raw: RawRow) -> Result<Self, RowSkip> {
        let score = if raw.score.is_empty() {
            0.0
        } else {
            parse_field(row, "score", &raw.score)?
        };

        Ok(Self {
            title: raw.title,
            score,
            score_phrase: raw.score_phrase,
            platform: raw.platform,
            genre: raw.genre,
            release_year: parse_field(row, "release_year", &raw.release_year)?,
            release_month: parse_field(row, "release_month", &raw.release_month)?,
            release_day: parse_field(row, "release_day", &raw.release_day)?,
        })
    }
}

fn parse_field<T: std::str::FromStr>(
    row: usize,
    field: &'static str,
    value: &str,
) -> Result<T, RowSkip> {
    value.trim().parse().map_err(|_| RowSkip::InvalidField {
        row,
        field,
        value: value.to_string(),
    })
}
