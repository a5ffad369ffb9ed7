use crate::catalog::{BookKey, IngestStats, Record};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One author matched by a query, with the books that passed the date filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorMatch {
    pub author: String,
    /// `len(author) - len(query)` in characters. Smaller ranks first.
    pub relevance: i64,
    /// Ascending book keys.
    pub books: Vec<BookKey>,
}

/// Settings shared with the HTTP handlers.
#[derive(Debug, Clone, Copy)]
pub struct SearchSettings {
    pub cutoff: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookResult {
    pub key: BookKey,
    pub citation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResult {
    pub author: String,
    pub relevance: i64,
    pub books: Vec<BookResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub cutoff: NaiveDateTime,
    pub total_count: usize,
    pub count: usize,
    pub results: Vec<AuthorResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookResponse {
    /// `None` when the path segment is not a valid key.
    pub key: Option<BookKey>,
    pub citation: Option<String>,
    pub record: Option<Record>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagsResponse {
    pub count: usize,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PopularResponse {
    pub count: usize,
    pub results: Vec<BookResult>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub books: usize,
    pub unique_tags: usize,
    pub ingest: IngestStats,
}
