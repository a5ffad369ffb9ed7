use super::types::AuthorMatch;
use crate::catalog::{BookKey, Catalog};
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

/// Books acquired before the first instant of this year are hidden from search.
pub const DEFAULT_CUTOFF_YEAR: i32 = 2018;

/// First instant (`00:00`) of January 1st of `year`.
pub fn cutoff_for_year(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)
}

/// Finds authors whose name contains `query`, ignoring case.
///
/// Each match keeps only the books acquired at or after `cutoff` (ascending by key);
/// authors left with no books are dropped. Matches are ordered by relevance, the number
/// of author-name characters not covered by the query, smallest first. Equal scores keep
/// the order in which the authors were first ingested.
pub fn rank_authors(catalog: &Catalog, query: &str, cutoff: NaiveDateTime) -> Vec<AuthorMatch> {
    let query = query.to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let query_len = query.chars().count() as i64;

    let mut matches: Vec<AuthorMatch> = Vec::new();
    for (author, keys) in catalog.author_books() {
        if !author.to_lowercase().contains(&query) {
            continue;
        }

        let books = recent_books(catalog, keys, cutoff);
        if books.is_empty() {
            continue;
        }

        matches.push(AuthorMatch {
            author: author.to_string(),
            relevance: author.chars().count() as i64 - query_len,
            books,
        });
    }

    matches.sort_by_key(|m| m.relevance);
    tracing::debug!("Query {:?} matched {} authors", query, matches.len());
    matches
}

/// Keeps the keys acquired at or after `cutoff`, in their given order.
///
/// A key missing from the catalog means the author index is out of step with the records;
/// it is logged and left out.
pub(crate) fn recent_books(
    catalog: &Catalog,
    keys: &[BookKey],
    cutoff: NaiveDateTime,
) -> Vec<BookKey> {
    keys.iter()
        .copied()
        .filter_map(|key| match catalog.is_recent(key, cutoff) {
            Ok(true) => Some(key),
            Ok(false) => None,
            Err(e) => {
                tracing::error!("Author index refers to a missing book: {}", e);
                None
            }
        })
        .collect()
}

/// Same as `rank_authors`, keyed by author name in rank order.
pub fn search(
    catalog: &Catalog,
    query: &str,
    cutoff: NaiveDateTime,
) -> IndexMap<String, Vec<BookKey>> {
    rank_authors(catalog, query, cutoff)
        .into_iter()
        .map(|m| (m.author, m.books))
        .collect()
}
