//! Query definition and response envelope types

use crate::error::{Error, Result};
use crate::types::{JsonValue, Page};

/// Page size used when the caller does not set one.
///
/// Always sending an explicit limit lets the termination test recognize the
/// last page without trusting total counts.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Immutable description of what to fetch for one pagination run
#[derive(Debug, Clone)]
pub struct QueryDefinition {
    /// Resource name (e.g. "orders", "taxCategories")
    pub endpoint: String,
    /// GraphQL document; present only for the GraphQL transport
    pub document: Option<String>,
    /// Caller-supplied filter predicate, or None
    pub where_clause: Option<String>,
    /// Caller-supplied sort terms (overridden by the paginator, see below)
    pub sort: Vec<String>,
    /// Page size, fixed once pagination starts
    pub limit: u32,
    /// Reference expansion path, if any
    pub expand: Option<String>,
}

impl QueryDefinition {
    /// Create a definition for an endpoint with default page size
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            document: None,
            where_clause: None,
            sort: Vec::new(),
            limit: DEFAULT_PAGE_SIZE,
            expand: None,
        }
    }

    /// Set the GraphQL document
    #[must_use]
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Set the filter predicate
    #[must_use]
    pub fn with_where(mut self, where_clause: impl Into<String>) -> Self {
        self.where_clause = Some(where_clause.into());
        self
    }

    /// Set sort terms. Pagination overrides these with `id asc`; the value
    /// is kept so the override can be reported.
    #[must_use]
    pub fn with_sort(mut self, sort: Vec<String>) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page size (floored at 1)
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Set the reference expansion path
    #[must_use]
    pub fn with_expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }
}

/// Decoded response of one page request: the result items plus any
/// data-level error objects the backend embedded in a 200 response.
#[derive(Debug, Clone, Default)]
pub struct ResultEnvelope {
    /// Ordered result items for this page
    pub results: Page,
    /// Data-level errors, if the body carried any
    pub errors: Option<Vec<JsonValue>>,
}

impl ResultEnvelope {
    /// Check whether the envelope carries a non-empty errors list
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Raw errors payload for diagnostics
    pub fn errors_value(&self) -> JsonValue {
        JsonValue::Array(self.errors.clone().unwrap_or_default())
    }

    /// Decode a REST response body: `{ results: [...], errors?: [...] }`
    pub fn from_rest(body: JsonValue) -> Result<Self> {
        let errors = decode_errors(&body);
        let results = match body.get("results") {
            Some(JsonValue::Array(items)) => items.clone(),
            None if errors.is_some() => Vec::new(),
            _ => {
                return Err(Error::decode(
                    "REST response body has no 'results' array",
                ))
            }
        };
        Ok(Self { results, errors })
    }

    /// Decode a GraphQL response body:
    /// `{ data: { <endpoint>: { results: [...] } }, errors?: [...] }`
    pub fn from_graphql(body: JsonValue, endpoint: &str) -> Result<Self> {
        let errors = decode_errors(&body);
        let results = match body
            .get("data")
            .and_then(|d| d.get(endpoint))
            .and_then(|e| e.get("results"))
        {
            Some(JsonValue::Array(items)) => items.clone(),
            None if errors.is_some() => Vec::new(),
            _ => {
                return Err(Error::decode(format!(
                    "GraphQL response has no 'data.{endpoint}.results' array"
                )))
            }
        };
        Ok(Self { results, errors })
    }
}

fn decode_errors(body: &JsonValue) -> Option<Vec<JsonValue>> {
    match body.get("errors") {
        Some(JsonValue::Array(errors)) => Some(errors.clone()),
        _ => None,
    }
}
