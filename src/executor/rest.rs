//! REST transport adapter

use super::QueryExecutor;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::query::{rest_query_params, QueryDefinition, ResultEnvelope};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Executes page requests as `GET /{projectKey}/{endpoint}` resource queries
#[derive(Debug, Clone)]
pub struct RestExecutor {
    http: Arc<HttpClient>,
    project_key: String,
}

impl RestExecutor {
    /// Create a REST executor for a project
    pub fn new(http: Arc<HttpClient>, project_key: impl Into<String>) -> Self {
        Self {
            http,
            project_key: project_key.into(),
        }
    }

    fn resource_path(&self, endpoint: &str) -> String {
        format!("/{}/{}", self.project_key, endpoint)
    }
}

#[async_trait]
impl QueryExecutor for RestExecutor {
    async fn fetch_page(
        &self,
        definition: &QueryDefinition,
        where_clause: Option<&str>,
        sort: &[String],
    ) -> Result<ResultEnvelope> {
        let mut request = RequestConfig::new();
        for (key, value) in rest_query_params(definition, where_clause, sort) {
            request = request.query(key, value);
        }

        debug!(
            endpoint = %definition.endpoint,
            r#where = ?where_clause,
            limit = definition.limit,
            "Fetching page via REST"
        );

        let body: Value = self
            .http
            .request_json(
                reqwest::Method::GET,
                &self.resource_path(&definition.endpoint),
                request,
            )
            .await?;

        ResultEnvelope::from_rest(body)
    }
}
