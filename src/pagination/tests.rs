//! Tests for cursor pagination
//!
//! Uses an in-memory executor that behaves like the backend: id-ordered
//! dataset, cursor predicate applied, bounded pages, optional error
//! injection.

use super::*;
use crate::error::{Error, Result};
use crate::executor::QueryExecutor;
use crate::query::{QueryDefinition, ResultEnvelope};
use async_trait::async_trait;
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Mutex;

/// One recorded page request
#[derive(Debug, Clone, PartialEq)]
struct RecordedCall {
    where_clause: Option<String>,
    sort: Vec<String>,
    limit: u32,
}

/// In-memory executor over an id-ordered dataset
struct FakeBackend {
    items: Vec<Value>,
    calls: Mutex<Vec<RecordedCall>>,
    /// Inject a data-level error envelope on this call number (1-based)
    fail_on_call: Option<usize>,
}

impl FakeBackend {
    fn with_ids(count: usize) -> Self {
        let items = (1..=count)
            .map(|n| json!({"id": format!("{n:04}"), "version": 1}))
            .collect();
        Self {
            items,
            calls: Mutex::new(Vec::new()),
            fail_on_call: None,
        }
    }

    fn failing_on(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// Split the effective where into cursor id and the residual filter
fn parse_where(where_clause: Option<&str>) -> (Option<String>, Option<String>) {
    let Some(clause) = where_clause else {
        return (None, None);
    };
    if let Some(rest) = clause.strip_prefix("id > \"") {
        let (id, tail) = rest.split_once('"').expect("unterminated cursor id");
        let residual = tail.strip_prefix(" AND ").map(str::to_string);
        (Some(id.to_string()), residual)
    } else {
        (None, Some(clause.to_string()))
    }
}

#[async_trait]
impl QueryExecutor for FakeBackend {
    async fn fetch_page(
        &self,
        definition: &QueryDefinition,
        where_clause: Option<&str>,
        sort: &[String],
    ) -> Result<ResultEnvelope> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                where_clause: where_clause.map(str::to_string),
                sort: sort.to_vec(),
                limit: definition.limit,
            });
            calls.len()
        };

        if self.fail_on_call == Some(call_number) {
            return Ok(ResultEnvelope {
                results: Vec::new(),
                errors: Some(vec![json!({"message": "injected failure"})]),
            });
        }

        let (cursor, _residual) = parse_where(where_clause);
        let results = self
            .items
            .iter()
            .filter(|item| match &cursor {
                Some(cursor) => item["id"].as_str().unwrap() > cursor.as_str(),
                None => true,
            })
            .take(definition.limit as usize)
            .cloned()
            .collect();

        Ok(ResultEnvelope {
            results,
            errors: None,
        })
    }
}

fn ids_of(page: &[Value]) -> Vec<String> {
    page.iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

// ============================================================================
// Page shapes and termination
// ============================================================================

#[tokio::test]
async fn test_45_items_limit_20_gives_three_pages() {
    let backend = FakeBackend::with_ids(45);
    let mut pages = paginate(&backend, QueryDefinition::new("orders").with_limit(20));

    let mut sizes = Vec::new();
    while let Some(page) = pages.try_next().await.unwrap() {
        sizes.push(page.len());
    }

    assert_eq!(sizes, vec![20, 20, 5]);
    assert_eq!(backend.call_count(), 3);
    assert!(pages.is_done());
}

#[tokio::test]
async fn test_exact_multiple_probes_one_extra_empty_page() {
    let backend = FakeBackend::with_ids(40);
    let mut pages = paginate(&backend, QueryDefinition::new("orders").with_limit(20));

    let mut sizes = Vec::new();
    while let Some(page) = pages.try_next().await.unwrap() {
        sizes.push(page.len());
    }

    // Totals are never trusted: the third request returns zero items and
    // only then does the sequence terminate.
    assert_eq!(sizes, vec![20, 20, 0]);
    assert_eq!(backend.call_count(), 3);
    assert_eq!(sizes.iter().sum::<usize>(), 40);
}

#[tokio::test]
async fn test_no_duplicates_no_gaps_ascending() {
    let backend = FakeBackend::with_ids(73);
    let mut pages = paginate(&backend, QueryDefinition::new("orders").with_limit(10));

    let mut seen = Vec::new();
    while let Some(page) = pages.try_next().await.unwrap() {
        seen.extend(ids_of(&page));
    }

    let expected: Vec<String> = (1..=73).map(|n| format!("{n:04}")).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_empty_dataset_yields_one_empty_page() {
    let backend = FakeBackend::with_ids(0);
    let mut pages = paginate(&backend, QueryDefinition::new("orders"));

    let first = pages.try_next().await.unwrap();
    assert_eq!(first, Some(Vec::new()));
    assert_eq!(pages.try_next().await.unwrap(), None);
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_exhausted_stream_stays_terminated() {
    let backend = FakeBackend::with_ids(3);
    let mut pages = paginate(&backend, QueryDefinition::new("orders").with_limit(20));

    assert!(pages.try_next().await.unwrap().is_some());
    assert!(pages.try_next().await.unwrap().is_none());
    assert!(pages.try_next().await.unwrap().is_none());
    // No request is issued once terminated
    assert_eq!(backend.call_count(), 1);
}

// ============================================================================
// Cursor and filter composition
// ============================================================================

#[tokio::test]
async fn test_cursor_composes_with_original_filter() {
    let backend = FakeBackend::with_ids(45);
    let definition = QueryDefinition::new("orders")
        .with_limit(20)
        .with_where("country = \"DE\"");
    let mut pages = paginate(&backend, definition.clone());

    while pages.try_next().await.unwrap().is_some() {}

    let calls = backend.calls();
    assert_eq!(calls.len(), 3);
    // First page: no cursor yet, original filter only
    assert_eq!(calls[0].where_clause.as_deref(), Some("country = \"DE\""));
    // Subsequent pages: cursor predicate conjoined with the unchanged filter
    assert_eq!(
        calls[1].where_clause.as_deref(),
        Some("id > \"0020\" AND country = \"DE\"")
    );
    assert_eq!(
        calls[2].where_clause.as_deref(),
        Some("id > \"0040\" AND country = \"DE\"")
    );
    // The caller's definition was never mutated
    assert_eq!(definition.where_clause.as_deref(), Some("country = \"DE\""));
}

#[tokio::test]
async fn test_cursor_tracks_last_item_id() {
    let backend = FakeBackend::with_ids(25);
    let mut pages = paginate(&backend, QueryDefinition::new("orders").with_limit(20));

    pages.try_next().await.unwrap();
    assert_eq!(pages.cursor(), Some("0020"));

    pages.try_next().await.unwrap();
    // Short page: cursor does not advance past the last full page
    assert!(pages.is_done());
    assert_eq!(pages.cursor(), Some("0020"));
}

#[tokio::test]
async fn test_default_limit_is_20() {
    let backend = FakeBackend::with_ids(5);
    let mut pages = paginate(&backend, QueryDefinition::new("orders"));
    pages.try_next().await.unwrap();

    assert_eq!(backend.calls()[0].limit, 20);
}

#[tokio::test]
async fn test_sort_is_forced_to_id_ascending() {
    let backend = FakeBackend::with_ids(5);
    let definition = QueryDefinition::new("orders")
        .with_sort(vec!["createdAt desc".to_string()]);
    let mut pages = paginate(&backend, definition);
    pages.try_next().await.unwrap();

    assert_eq!(backend.calls()[0].sort, vec!["id asc".to_string()]);
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_data_level_errors_abort_before_yield() {
    let backend = FakeBackend::with_ids(45).failing_on(2);
    let mut pages = paginate(&backend, QueryDefinition::new("orders").with_limit(20));

    // Page 1 is valid and already consumed
    let first = pages.try_next().await.unwrap().unwrap();
    assert_eq!(first.len(), 20);

    // Page 2 fails with the full context attached
    let err = pages.try_next().await.unwrap_err();
    match err {
        Error::Query {
            endpoint,
            where_clause,
            limit,
            errors,
        } => {
            assert_eq!(endpoint, "orders");
            assert_eq!(where_clause.as_deref(), Some("id > \"0020\""));
            assert_eq!(limit, 20);
            assert_eq!(errors, json!([{"message": "injected failure"}]));
        }
        other => panic!("expected Error::Query, got {other:?}"),
    }

    // Terminal: no further requests
    assert!(pages.is_done());
    assert_eq!(pages.try_next().await.unwrap(), None);
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn test_missing_id_on_full_page_is_an_error() {
    struct NoIdBackend;

    #[async_trait]
    impl QueryExecutor for NoIdBackend {
        async fn fetch_page(
            &self,
            definition: &QueryDefinition,
            _where_clause: Option<&str>,
            _sort: &[String],
        ) -> Result<ResultEnvelope> {
            // A full page whose items carry no id: no cursor can be derived
            let results = (0..definition.limit).map(|_| json!({"name": "x"})).collect();
            Ok(ResultEnvelope {
                results,
                errors: None,
            })
        }
    }

    let backend = NoIdBackend;
    let mut pages = paginate(&backend, QueryDefinition::new("orders").with_limit(2));
    let err = pages.try_next().await.unwrap_err();
    assert!(err.to_string().contains("cannot derive cursor"));
    assert!(pages.is_done());
}

// ============================================================================
// Early stop and Stream adapter
// ============================================================================

#[tokio::test]
async fn test_early_stop_issues_no_further_requests() {
    let backend = FakeBackend::with_ids(100);
    let mut pages = paginate(&backend, QueryDefinition::new("orders").with_limit(20));

    let first = pages.try_next().await.unwrap().unwrap();
    assert_eq!(first.len(), 20);
    drop(pages);

    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_into_stream_collects_all_pages() {
    let backend = FakeBackend::with_ids(45);
    let stream = paginate(&backend, QueryDefinition::new("orders").with_limit(20)).into_stream();

    let pages: Vec<_> = stream.try_collect().await.unwrap();
    let sizes: Vec<usize> = pages.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![20, 20, 5]);
}

#[tokio::test]
async fn test_into_stream_propagates_errors() {
    let backend = FakeBackend::with_ids(45).failing_on(1);
    let stream = paginate(&backend, QueryDefinition::new("orders").with_limit(20)).into_stream();

    let result: Result<Vec<_>> = stream.try_collect().await;
    assert!(result.unwrap_err().is_query_error());
}
