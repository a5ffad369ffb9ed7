use std::io;

use thiserror::Error;

use super::types::BookKey;

/// Error type for catalog loading, lookup, and export failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
    #[error("unknown book key {0}")]
    UnknownKey(BookKey),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CatalogError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        CatalogError::MalformedRow {
            line,
            reason: reason.into(),
        }
    }
}
