//! Query executors
//!
//! One capability interface, two transports. The cursor paginator is
//! written once against [`QueryExecutor`]; the REST and GraphQL adapters
//! differ only in how a single page request is rendered and decoded. Both
//! decode a data-level `errors` array from the body identically, so the
//! paginator's error contract holds regardless of transport.

mod graphql;
mod rest;

pub use graphql::GraphQlExecutor;
pub use rest::RestExecutor;

use crate::error::Result;
use crate::query::{QueryDefinition, ResultEnvelope};
use async_trait::async_trait;

/// Executes one bounded page request against the backend.
///
/// Implementations must surface transport failures (network, HTTP status,
/// auth) as errors, and return successful bodies as an envelope that may
/// itself carry a data-level `errors` list. Retry, auth and rate limiting
/// are the implementation's concern; callers never retry.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Fetch one page for `definition`, using `where_clause` as the
    /// effective filter and `sort` as the effective sort for this request.
    async fn fetch_page(
        &self,
        definition: &QueryDefinition,
        where_clause: Option<&str>,
        sort: &[String],
    ) -> Result<ResultEnvelope>;
}
