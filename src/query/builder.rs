//! Filter composition and wire rendering
//!
//! `effective_where` is the heart of cursor safety: it recomputes the filter
//! for every page from two immutable inputs, so no shared "where" state is
//! ever mutated across iterations.

use super::types::QueryDefinition;
use serde_json::{json, Value};

/// Compose the filter actually sent for one page.
///
/// Conjunction of `id > "<cursor>"` and the caller's original filter. The
/// cursor term is omitted before the first page; an empty original filter is
/// treated as absent. Returns None when nothing constrains the page.
pub fn effective_where(original: Option<&str>, cursor: Option<&str>) -> Option<String> {
    let cursor_predicate = cursor.map(|id| format!("id > \"{id}\""));

    let parts: Vec<&str> = [cursor_predicate.as_deref(), original]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" AND "))
    }
}

/// Render REST query parameters for one page request.
///
/// `withTotal=false` is always sent: total counts are not trusted by the
/// termination test, so there is no point paying for them.
pub fn rest_query_params(
    definition: &QueryDefinition,
    where_clause: Option<&str>,
    sort: &[String],
) -> Vec<(String, String)> {
    let mut params = Vec::new();

    if let Some(where_clause) = where_clause {
        params.push(("where".to_string(), where_clause.to_string()));
    }
    params.push(("limit".to_string(), definition.limit.to_string()));
    for term in sort {
        params.push(("sort".to_string(), term.clone()));
    }
    if let Some(expand) = &definition.expand {
        params.push(("expand".to_string(), expand.clone()));
    }
    params.push(("withTotal".to_string(), "false".to_string()));

    params
}

/// Render GraphQL variables for one page request
pub fn graphql_variables(
    definition: &QueryDefinition,
    where_clause: Option<&str>,
    sort: &[String],
) -> Value {
    json!({
        "limit": definition.limit,
        "sort": sort,
        "where": where_clause,
    })
}

/// A minimal GraphQL document selecting only ids, suitable for walking an
/// endpoint when the caller has no document of their own.
pub fn minimal_document(endpoint: &str) -> String {
    format!(
        "query fetchPage($limit: Int, $sort: [String!], $where: String) {{\n    \
         {endpoint}(limit: $limit, sort: $sort, where: $where) {{\n        \
         results {{\n            id\n        }}\n    }}\n}}"
    )
}
