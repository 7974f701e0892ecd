//! Batch consumption with bounded fan-out
//!
//! Drives a [`PageStream`] page by page and fans item-level work across a
//! bounded pool of concurrent futures. Page fetches stay strictly
//! sequential: every item of page *k* completes (or the pool drains after a
//! failure) before page *k+1* is requested. The fan-out degree is caller
//! configuration, not pagination state.

use crate::config::DEFAULT_CONCURRENCY;
use crate::error::Result;
use crate::pagination::PageStream;
use crate::types::JsonValue;
use futures::stream::{self, TryStreamExt};
use std::future::Future;
use tracing::debug;

/// Counters for one completed batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Pages consumed (including a trailing empty page, if any)
    pub pages: u64,
    /// Items handed to the handler
    pub items: u64,
}

/// Pulls pages and processes items with bounded concurrency
#[derive(Debug, Clone, Copy)]
pub struct BatchProcessor {
    concurrency: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl BatchProcessor {
    /// Create a processor with the given fan-out degree (floored at 1)
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    /// The configured fan-out degree
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Consume the whole sequence, applying `handler` to every item.
    ///
    /// Fail-fast: a handler error (or a page fetch error) terminates the
    /// run after in-flight siblings drain; no further page is fetched.
    /// Stopping earlier than the terminal page is done by driving the
    /// `PageStream` by hand instead.
    pub async fn run<F, Fut>(&self, mut pages: PageStream<'_>, handler: F) -> Result<BatchStats>
    where
        F: Fn(JsonValue) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let mut stats = BatchStats::default();

        while let Some(page) = pages.try_next().await? {
            stats.pages += 1;
            let item_count = page.len() as u64;

            stream::iter(page.into_iter().map(Ok))
                .try_for_each_concurrent(self.concurrency, &handler)
                .await?;

            stats.items += item_count;
            debug!(
                pages = stats.pages,
                items = stats.items,
                "Batch page complete"
            );
        }

        Ok(stats)
    }
}
