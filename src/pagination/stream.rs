//! The pull-based page stream

use crate::error::{Error, Result};
use crate::executor::QueryExecutor;
use crate::query::{effective_where, QueryDefinition};
use crate::types::{item_id, Page};
use futures::Stream;
use tracing::{debug, warn};

/// Sort forced for every pagination run. Cursor exclusion (`id > last`)
/// only holds when `id` is the primary order of the results.
const CURSOR_SORT: &str = "id asc";

/// Lazy, pull-based sequence of pages for one query definition.
///
/// One instance per run; the internal cursor is consumed as the sequence
/// advances, so re-iterating requires a fresh instance. The caller's query
/// definition is never mutated — only the filter sent on the wire changes
/// from page to page.
///
/// Known limitation: any caller-supplied sort is replaced by `id asc`, not
/// merged with it. Appending `id` as a tiebreaker behind another primary
/// sort would break the cursor predicate, so the override is total; it is
/// reported with a warning instead of silently.
pub struct PageStream<'a> {
    executor: &'a dyn QueryExecutor,
    definition: QueryDefinition,
    sort: Vec<String>,
    cursor: Option<String>,
    done: bool,
}

impl<'a> PageStream<'a> {
    /// Start a pagination run for `definition` on `executor`
    pub fn new(executor: &'a dyn QueryExecutor, definition: QueryDefinition) -> Self {
        if !definition.sort.is_empty() && definition.sort != [CURSOR_SORT] {
            warn!(
                endpoint = %definition.endpoint,
                requested = ?definition.sort,
                "Caller-supplied sort is replaced by '{CURSOR_SORT}' for cursor safety"
            );
        }

        Self {
            executor,
            definition,
            sort: vec![CURSOR_SORT.to_string()],
            cursor: None,
            done: false,
        }
    }

    /// The cursor after the most recently yielded *full* page (the id of
    /// its last item), or None before the first full page. A short final
    /// page does not advance it, so after termination it still points at
    /// the last position a resumed scan would continue from.
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    /// Whether the sequence has terminated
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Fetch the next page.
    ///
    /// Returns `Ok(Some(page))` while pages remain (the final page may be
    /// empty), `Ok(None)` once the sequence has terminated, and `Err` on a
    /// transport failure or a data-level error envelope. Errors are
    /// terminal: the failing page is not yielded and no further request is
    /// issued.
    pub async fn try_next(&mut self) -> Result<Option<Page>> {
        if self.done {
            return Ok(None);
        }

        let where_clause = effective_where(
            self.definition.where_clause.as_deref(),
            self.cursor.as_deref(),
        );

        let envelope = self
            .executor
            .fetch_page(&self.definition, where_clause.as_deref(), &self.sort)
            .await
            .inspect_err(|_| self.done = true)?;

        if envelope.has_errors() {
            self.done = true;
            return Err(Error::query(
                self.definition.endpoint.clone(),
                where_clause,
                self.definition.limit,
                envelope.errors_value(),
            ));
        }

        let page = envelope.results;
        debug!(
            endpoint = %self.definition.endpoint,
            items = page.len(),
            cursor = ?self.cursor,
            "Fetched page"
        );

        if page.len() < self.definition.limit as usize {
            // Short or empty page: this is the last one. Totals are never
            // consulted, so an exact-multiple dataset reaches this branch
            // via one extra empty page.
            self.done = true;
        } else if let Some(last) = page.last() {
            match item_id(last) {
                Some(id) => self.cursor = Some(id.to_string()),
                None => {
                    self.done = true;
                    return Err(Error::decode(format!(
                        "Result item on '{}' has no string 'id'; cannot derive cursor",
                        self.definition.endpoint
                    )));
                }
            }
        }

        Ok(Some(page))
    }

    /// Convert into a `futures::Stream` of pages for combinator-style
    /// consumers. Fetches stay strictly sequential.
    pub fn into_stream(self) -> impl Stream<Item = Result<Page>> + 'a {
        futures::stream::try_unfold(self, |mut pages| async move {
            match pages.try_next().await? {
                Some(page) => Ok(Some((page, pages))),
                None => Ok(None),
            }
        })
    }
}

impl std::fmt::Debug for PageStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStream")
            .field("endpoint", &self.definition.endpoint)
            .field("limit", &self.definition.limit)
            .field("cursor", &self.cursor)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// Start a pagination run. Convenience for [`PageStream::new`].
pub fn paginate<'a>(
    executor: &'a dyn QueryExecutor,
    definition: QueryDefinition,
) -> PageStream<'a> {
    PageStream::new(executor, definition)
}
