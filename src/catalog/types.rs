//! Catalog Data Types
//!
//! Defines the `Record` stored for every book together with the column layout of the
//! source feed and the one-time field conversions applied at ingestion.

use super::error::CatalogError;
use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Unique integer identifier assigned to a record after collision resolution.
pub type BookKey = i64;

/// Number of fields every source row must carry. Extra trailing fields are ignored.
pub const FIELD_COUNT: usize = 13;

pub const COL_ID: usize = 0;
pub const COL_TITLE: usize = 1;
pub const COL_MEDIA_TYPE: usize = 2;
pub const COL_AUTHOR: usize = 3;
pub const COL_AUTHOR_FULL: usize = 4;
pub const COL_AGE_RATING: usize = 5;
pub const COL_ACQUIRED_AT: usize = 6;
pub const COL_PRICE: usize = 7;
pub const COL_READERS: usize = 8;
pub const COL_DECOMMISSIONED: usize = 9;
pub const COL_INVENTORY: usize = 10;
pub const COL_DUE: usize = 11;
pub const COL_GENRES: usize = 12;

/// Acquisition timestamp layout, e.g. `24.09.2016 16:59`.
pub const ACQUIRED_AT_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Titles longer than this many characters are counted as "long".
pub const LONG_TITLE_CHARS: usize = 30;

/// A single parsed book entry.
///
/// Text columns are passed through untouched. Only the acquisition timestamp,
/// the reader count, and the genre tags are converted when the record is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Identifier declared by the source row. May collide with other rows.
    pub source_id: BookKey,
    pub title: String,
    pub media_type: String,
    pub author: String,
    /// Full author name. Records are grouped and searched by this field.
    pub author_full: String,
    pub age_rating: String,
    pub acquired_at: NaiveDateTime,
    pub price: String,
    pub readers: u64,
    pub decommissioned_on: String,
    pub inventory_number: String,
    pub due_date: String,
    /// Raw `#`-delimited genre string.
    pub genres: String,
    /// Trimmed, non-empty tags parsed from `genres`, in source order.
    pub tags: Vec<String>,
}

impl Record {
    /// Builds a record from one row of raw fields.
    ///
    /// `line` is only used to label errors. Fields past `FIELD_COUNT` are ignored.
    pub fn from_row<S: AsRef<str>>(row: &[S], line: usize) -> Result<Self, CatalogError> {
        if row.len() < FIELD_COUNT {
            return Err(CatalogError::malformed(
                line,
                format!("expected {} fields, found {}", FIELD_COUNT, row.len()),
            ));
        }
        let field = |col: usize| row[col].as_ref();

        let source_id = field(COL_ID).trim().parse::<BookKey>().map_err(|e| {
            CatalogError::malformed(line, format!("identifier {:?}: {}", field(COL_ID), e))
        })?;
        let acquired_at = parse_acquired_at(field(COL_ACQUIRED_AT)).ok_or_else(|| {
            CatalogError::malformed(
                line,
                format!(
                    "acquisition date {:?} does not match {}",
                    field(COL_ACQUIRED_AT),
                    ACQUIRED_AT_FORMAT
                ),
            )
        })?;
        let readers = parse_reader_count(field(COL_READERS)).ok_or_else(|| {
            CatalogError::malformed(line, format!("reader count {:?}", field(COL_READERS)))
        })?;

        Ok(Self {
            source_id,
            title: field(COL_TITLE).to_string(),
            media_type: field(COL_MEDIA_TYPE).to_string(),
            author: field(COL_AUTHOR).to_string(),
            author_full: field(COL_AUTHOR_FULL).to_string(),
            age_rating: field(COL_AGE_RATING).to_string(),
            acquired_at,
            price: field(COL_PRICE).to_string(),
            readers,
            decommissioned_on: field(COL_DECOMMISSIONED).to_string(),
            inventory_number: field(COL_INVENTORY).to_string(),
            due_date: field(COL_DUE).to_string(),
            genres: field(COL_GENRES).to_string(),
            tags: parse_tags(field(COL_GENRES)),
        })
    }

    /// `"{author_full}. {title} - {year}"`
    pub fn citation(&self) -> String {
        format!(
            "{}. {} - {}",
            self.author_full,
            self.title,
            self.acquired_at.year()
        )
    }

    pub fn has_long_title(&self) -> bool {
        self.title.chars().count() > LONG_TITLE_CHARS
    }
}

/// Parses `day.month.year hour:minute`.
pub fn parse_acquired_at(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), ACQUIRED_AT_FORMAT).ok()
}

/// Keeps everything left of the first `.` and reads it as an integer.
///
/// The fractional part is dropped, never rounded: `"223.3"` is 223.
pub fn parse_reader_count(value: &str) -> Option<u64> {
    let whole = value.split('.').next().unwrap_or(value).trim();
    whole.parse::<u64>().ok()
}

/// Splits a genre string on `#`, trimming each piece and discarding blanks.
pub fn parse_tags(value: &str) -> Vec<String> {
    value
        .split('#')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Row counters collected while the catalog is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Rows successfully ingested.
    pub total_rows: usize,
    /// Ingested rows whose title is longer than `LONG_TITLE_CHARS`.
    pub long_titles: usize,
    /// Rows rejected as malformed and skipped by the loader.
    pub skipped_rows: usize,
}

impl IngestStats {
    pub fn record(&mut self, record: &Record) {
        self.total_rows += 1;
        if record.has_long_title() {
            self.long_titles += 1;
        }
    }
}
