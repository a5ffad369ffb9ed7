//! Book Catalog Library
//!
//! This library crate indexes a delimited catalog of library books and answers author
//! queries against it. It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of four loosely coupled subsystems plus configuration:
//!
//! - **`catalog`**: The in-memory index. Records keyed by collision-free integers, books
//!   grouped by author, and the deduplicated tag vocabulary. Built through a mutable
//!   `CatalogBuilder` and frozen into a read-only `Catalog`.
//! - **`ingestion`**: The data intake pipeline. Reads `;`-delimited exports, skips the
//!   header, and feeds rows into the builder under a configurable malformed-row policy.
//! - **`search`**: Case-insensitive substring matching over author names with a recency
//!   filter and length-based relevance ranking. Also exposes read-only HTTP handlers.
//! - **`report`**: Console statistics, the popularity listing, the random citation export,
//!   and the interactive query loop.
//! - **`config`**: Command-line and environment settings for the binary.

pub mod catalog;
pub mod config;
pub mod ingestion;
pub mod report;
pub mod search;
