//! GraphQL transport adapter

use super::QueryExecutor;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::query::{graphql_variables, QueryDefinition, ResultEnvelope};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Executes page requests as `POST /{projectKey}/graphql` documents
#[derive(Debug, Clone)]
pub struct GraphQlExecutor {
    http: Arc<HttpClient>,
    project_key: String,
}

impl GraphQlExecutor {
    /// Create a GraphQL executor for a project
    pub fn new(http: Arc<HttpClient>, project_key: impl Into<String>) -> Self {
        Self {
            http,
            project_key: project_key.into(),
        }
    }

    fn graphql_path(&self) -> String {
        format!("/{}/graphql", self.project_key)
    }
}

#[async_trait]
impl QueryExecutor for GraphQlExecutor {
    async fn fetch_page(
        &self,
        definition: &QueryDefinition,
        where_clause: Option<&str>,
        sort: &[String],
    ) -> Result<ResultEnvelope> {
        let document = definition.document.as_deref().ok_or_else(|| {
            Error::config(format!(
                "GraphQL transport requires a document for endpoint '{}'",
                definition.endpoint
            ))
        })?;

        let variables = graphql_variables(definition, where_clause, sort);
        let request = RequestConfig::new().json(json!({
            "query": document,
            "variables": variables,
        }));

        debug!(
            endpoint = %definition.endpoint,
            r#where = ?where_clause,
            limit = definition.limit,
            "Fetching page via GraphQL"
        );

        let body: Value = self
            .http
            .request_json(reqwest::Method::POST, &self.graphql_path(), request)
            .await?;

        ResultEnvelope::from_graphql(body, &definition.endpoint)
    }
}
