use super::engine::rank_authors;
use super::types::{
    AuthorResult, BookResponse, BookResult, PopularParams, PopularResponse, SearchParams,
    SearchResponse, SearchSettings, StatsResponse, TagsResponse,
};
use crate::catalog::{BookKey, Catalog};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_POPULAR_LIMIT: usize = 20;

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(catalog): Extension<Arc<Catalog>>,
    Extension(settings): Extension<SearchSettings>,
) -> Json<SearchResponse> {
    let matches = rank_authors(&catalog, &params.q, settings.cutoff);
    let total_count = matches.len();
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = params.offset.unwrap_or(0);

    let results: Vec<AuthorResult> = matches
        .into_iter()
        .skip(offset)
        .take(limit)
        .map(|m| AuthorResult {
            books: cite_all(&catalog, &m.books),
            author: m.author,
            relevance: m.relevance,
        })
        .collect();

    Json(SearchResponse {
        query: params.q,
        cutoff: settings.cutoff,
        total_count,
        count: results.len(),
        results,
    })
}

pub async fn handle_get_book(
    Extension(catalog): Extension<Arc<Catalog>>,
    Path(key_str): Path<String>,
) -> (StatusCode, Json<BookResponse>) {
    let key: BookKey = match key_str.parse() {
        Ok(k) => k,
        Err(e) => {
            tracing::debug!("Failed to parse book key {:?}: {}", key_str, e);
            return (
                StatusCode::BAD_REQUEST,
                Json(BookResponse {
                    key: None,
                    citation: None,
                    record: None,
                }),
            );
        }
    };

    match catalog.get(key) {
        Ok(record) => (
            StatusCode::OK,
            Json(BookResponse {
                key: Some(key),
                citation: Some(record.citation()),
                record: Some(record.clone()),
            }),
        ),
        Err(e) => {
            tracing::debug!("{}", e);
            (
                StatusCode::NOT_FOUND,
                Json(BookResponse {
                    key: Some(key),
                    citation: None,
                    record: None,
                }),
            )
        }
    }
}

pub async fn handle_tags(Extension(catalog): Extension<Arc<Catalog>>) -> Json<TagsResponse> {
    let tags = catalog.tag_vocabulary();
    Json(TagsResponse {
        count: tags.len(),
        tags,
    })
}

pub async fn handle_popular(
    Query(params): Query<PopularParams>,
    Extension(catalog): Extension<Arc<Catalog>>,
) -> Json<PopularResponse> {
    let keys = catalog.rank_by_popularity(params.limit.unwrap_or(DEFAULT_POPULAR_LIMIT));
    let results = cite_all(&catalog, &keys);
    Json(PopularResponse {
        count: results.len(),
        results,
    })
}

pub async fn handle_stats(Extension(catalog): Extension<Arc<Catalog>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        books: catalog.len(),
        unique_tags: catalog.tag_count(),
        ingest: catalog.stats(),
    })
}

fn cite_all(catalog: &Catalog, keys: &[BookKey]) -> Vec<BookResult> {
    keys.iter()
        .filter_map(|key| match catalog.get_citation(*key) {
            Ok(citation) => Some(BookResult {
                key: *key,
                citation,
            }),
            Err(e) => {
                tracing::error!("Index returned a key it does not hold: {}", e);
                None
            }
        })
        .collect()
}
