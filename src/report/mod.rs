//! Reporting Module
//!
//! Everything that turns a finalized `Catalog` into text for a person to read.
//!
//! ## Submodules
//! - **`console`**: Tag list, statistics table, popularity listing, and search result blocks.
//! - **`export`**: Random citation sample written to a text file.
//! - **`repl`**: Interactive author-search loop.

pub mod console;
pub mod export;
pub mod repl;
