use super::error::CatalogError;
use super::identity;
use super::types::{BookKey, IngestStats, Record};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Mutable build phase of the catalog.
///
/// `ingest` is the only way to add data. Call `finalize` once every row has been fed
/// in to obtain the read-only `Catalog`.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    records: IndexMap<BookKey, Record>,
    authors: IndexMap<String, Vec<BookKey>>,
    tags: BTreeSet<String>,
    stats: IngestStats,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one row and adds it to the index.
    ///
    /// Returns the key the record was stored under, which differs from the declared
    /// identifier when that identifier was already taken. A malformed row leaves the
    /// builder untouched.
    pub fn ingest<S: AsRef<str>>(
        &mut self,
        row: &[S],
        line: usize,
    ) -> Result<BookKey, CatalogError> {
        let record = Record::from_row(row, line)?;
        Ok(self.insert(record))
    }

    fn insert(&mut self, record: Record) -> BookKey {
        let key = identity::resolve(record.source_id, &self.records);

        self.stats.record(&record);
        self.authors
            .entry(record.author_full.clone())
            .or_default()
            .push(key);
        self.tags.extend(record.tags.iter().cloned());
        self.records.insert(key, record);

        key
    }

    /// Counts a row that the loader rejected and chose to skip.
    pub fn note_skipped(&mut self) {
        self.stats.skipped_rows += 1;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Sorts every author's book list and freezes the index.
    pub fn finalize(mut self) -> Catalog {
        for keys in self.authors.values_mut() {
            keys.sort_unstable();
        }

        tracing::info!(
            "Catalog finalized: {} books, {} authors, {} tags",
            self.records.len(),
            self.authors.len(),
            self.tags.len()
        );

        Catalog {
            records: self.records,
            authors: self.authors,
            tags: self.tags,
            stats: self.stats,
        }
    }
}

/// Read-only query phase of the catalog.
///
/// Every author's book list is ascending by key. The type has no mutating methods, so
/// it can be shared between readers behind an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct Catalog {
    records: IndexMap<BookKey, Record>,
    authors: IndexMap<String, Vec<BookKey>>,
    tags: BTreeSet<String>,
    stats: IngestStats,
}

impl Catalog {
    pub fn get(&self, key: BookKey) -> Result<&Record, CatalogError> {
        self.records.get(&key).ok_or(CatalogError::UnknownKey(key))
    }

    pub fn contains(&self, key: BookKey) -> bool {
        self.records.contains_key(&key)
    }

    /// Formats a record as `"{author_full}. {title} - {year}"`.
    pub fn get_citation(&self, key: BookKey) -> Result<String, CatalogError> {
        self.get(key).map(Record::citation)
    }

    /// True when the record was acquired at or after `cutoff`.
    pub fn is_recent(&self, key: BookKey, cutoff: NaiveDateTime) -> Result<bool, CatalogError> {
        self.get(key).map(|record| record.acquired_at >= cutoff)
    }

    /// All keys in insertion order.
    pub fn all_keys(&self) -> Vec<BookKey> {
        self.records.keys().copied().collect()
    }

    /// Distinct tags, sorted.
    pub fn tag_vocabulary(&self) -> Vec<String> {
        self.tags.iter().cloned().collect()
    }

    /// Author names in the order they were first seen.
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }

    /// Author names paired with their ascending book keys, in first-seen order.
    pub fn author_books(&self) -> impl Iterator<Item = (&str, &[BookKey])> {
        self.authors
            .iter()
            .map(|(author, keys)| (author.as_str(), keys.as_slice()))
    }

    pub fn books_by(&self, author: &str) -> Option<&[BookKey]> {
        self.authors.get(author).map(Vec::as_slice)
    }

    /// Top `top_n` keys by reader count, highest first.
    ///
    /// The sort is stable over insertion order, so records with equal counts keep the
    /// order in which they were ingested.
    pub fn rank_by_popularity(&self, top_n: usize) -> Vec<BookKey> {
        let mut ranked: Vec<(BookKey, u64)> = self
            .records
            .iter()
            .map(|(key, record)| (*key, record.readers))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(top_n).map(|(key, _)| key).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }
}
