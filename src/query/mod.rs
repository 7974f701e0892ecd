//! Query definitions and filter composition
//!
//! A `QueryDefinition` describes what to fetch (endpoint or GraphQL
//! document, filter, sort, page size) and stays immutable for the lifetime
//! of a pagination run. The filter actually sent on the wire changes every
//! page; it is recomputed from scratch by [`effective_where`] so the
//! original filter is never touched.

mod builder;
mod types;

pub use builder::{effective_where, graphql_variables, minimal_document, rest_query_params};
pub use types::{QueryDefinition, ResultEnvelope, DEFAULT_PAGE_SIZE};
