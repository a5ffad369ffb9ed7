//! Ingestion Module
//!
//! Turns a delimited catalog export into a finalized `Catalog`.
//!
//! ## Workflow
//! 1. **Read**: `DelimitedReader` splits the source into records, honouring double-quoted
//!    fields that contain the delimiter or span several lines.
//! 2. **Skip header**: The first record names the columns and is never ingested.
//! 3. **Ingest**: Every remaining record goes through `CatalogBuilder::ingest`. Malformed
//!    rows either abort the load or are skipped, depending on `MalformedPolicy`.
//! 4. **Finalize**: The builder is frozen into a read-only `Catalog`.

pub mod loader;
pub mod reader;
pub mod types;

#[cfg(test)]
mod tests;
