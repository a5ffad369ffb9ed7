use super::reader::DelimitedReader;
use super::types::{LoadOptions, MalformedPolicy};
use crate::catalog::{Catalog, CatalogBuilder, CatalogError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads every record from `source`, skipping the header, and returns the finalized catalog.
pub fn load_catalog<R: BufRead>(source: R, options: LoadOptions) -> Result<Catalog, CatalogError> {
    let mut rows = DelimitedReader::new(source, options.delimiter).with_encoding(options.encoding);
    let mut builder = CatalogBuilder::new();

    match rows.next() {
        Some(Ok(header)) => {
            tracing::debug!("Skipping header with {} columns", header.fields.len());
        }
        Some(Err(e)) => return Err(e),
        None => {
            tracing::warn!("Source is empty, catalog will have no books");
            return Ok(builder.finalize());
        }
    }

    for row in rows.by_ref() {
        let result = row.and_then(|row| builder.ingest(&row.fields, row.line));
        match result {
            Ok(_) => {}
            Err(CatalogError::MalformedRow { line, reason })
                if options.policy == MalformedPolicy::Skip =>
            {
                tracing::warn!("Skipping malformed row at line {}: {}", line, reason);
                builder.note_skipped();
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        "Read {} lines, ingested {} books ({} skipped)",
        rows.lines_read(),
        builder.len(),
        builder.stats().skipped_rows
    );

    Ok(builder.finalize())
}

/// Opens `path` and loads it with `load_catalog`.
pub fn load_catalog_file(path: &Path, options: LoadOptions) -> Result<Catalog, CatalogError> {
    tracing::info!("Reading catalog from {}", path.display());
    let file = File::open(path)?;
    load_catalog(BufReader::new(file), options)
}
