//! Ingestion Data Types
//!
//! Rows as they come out of the delimited reader, and the options that control how the
//! loader treats them.

use crate::catalog::CatalogError;
use encoding_rs::{Encoding, UTF_8_INIT};
use std::str::FromStr;

/// Field separator used by the library export files.
pub const DEFAULT_DELIMITER: char = ';';

/// Text encoding assumed when none is configured.
pub static DEFAULT_ENCODING: &Encoding = &UTF_8_INIT;

/// Looks up an encoding by its WHATWG label (`utf-8`, `windows-1251`, `cp1251`, ...).
///
/// Only ASCII-compatible encodings are accepted, since records are split on raw `\n` bytes.
pub fn parse_encoding(label: &str) -> Result<&'static Encoding, CatalogError> {
    let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        CatalogError::Configuration(format!("unknown encoding {:?}", label))
    })?;
    if !encoding.is_ascii_compatible() {
        return Err(CatalogError::Configuration(format!(
            "encoding {} is not ASCII-compatible",
            encoding.name()
        )));
    }
    Ok(encoding)
}

/// One record produced by the delimited reader.
///
/// `line` is the 1-based line on which the record starts. A quoted field may carry the
/// record over several physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub line: usize,
    pub fields: Vec<String>,
}

/// What the loader does when a row cannot be turned into a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Abort the load with the row's error.
    #[default]
    Halt,
    /// Log the row, count it as skipped, and keep going.
    Skip,
}

impl FromStr for MalformedPolicy {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "halt" => Ok(MalformedPolicy::Halt),
            "skip" => Ok(MalformedPolicy::Skip),
            other => Err(CatalogError::Configuration(format!(
                "unknown malformed-row policy {:?} (expected \"halt\" or \"skip\")",
                other
            ))),
        }
    }
}

/// Options for turning a delimited source into a catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadOptions {
    pub delimiter: char,
    pub policy: MalformedPolicy,
    /// Encoding of the source bytes. Lines that do not decode are malformed rows.
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            policy: MalformedPolicy::Halt,
            encoding: DEFAULT_ENCODING,
        }
    }
}
