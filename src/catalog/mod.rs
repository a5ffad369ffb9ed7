//! Catalog Index Module
//!
//! The in-memory store at the heart of the system. Every parsed book row ends up here.
//!
//! ## Phases
//! - **Build**: `CatalogBuilder` accepts rows one by one through `ingest`. Each row is
//!   converted into a `Record`, assigned a collision-free key, grouped under its author,
//!   and its genre tags are merged into the shared vocabulary.
//! - **Query**: `CatalogBuilder::finalize` sorts every author's book list and returns an
//!   immutable `Catalog`. Only the `Catalog` exposes lookups, so reads that depend on
//!   sort order cannot run before the build is complete.
//!
//! ## Submodules
//! - **`identity`**: Next-free-key resolution for colliding source identifiers.
//! - **`index`**: `CatalogBuilder` and the frozen `Catalog`.
//! - **`types`**: `Record`, column layout, and field conversions.
//! - **`error`**: `CatalogError`.

pub mod error;
pub mod identity;
pub mod index;
pub mod types;

pub use error::CatalogError;
pub use index::{Catalog, CatalogBuilder};
pub use types::{BookKey, IngestStats, Record};
