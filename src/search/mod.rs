//! Author Search Module
//!
//! Answers "which authors match this text, and which of their recent books can I show?".
//!
//! ## Overview
//! A query is matched as a case-insensitive substring of every known author's full name.
//! Matching authors keep only the books acquired on or after the recency cutoff, and are
//! ranked by how closely the query length matches the name length.
//!
//! ## Submodules
//! - **`engine`**: Matching, date filtering, and relevance ranking.
//! - **`handlers`**: Read-only HTTP handlers over a finalized `Catalog`.
//! - **`types`**: Match results and HTTP DTOs.

pub mod engine;
pub mod handlers;
pub mod types;
