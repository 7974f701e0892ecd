//! Project configuration
//!
//! Credentials and hosts are taken from environment variables, the same way
//! the deployment scripts provide them:
//!
//! - `CTP_PROJECT_KEY` (required)
//! - `CTP_CLIENT_ID` (required)
//! - `CTP_CLIENT_SECRET` (required)
//! - `CTP_API_URL` (optional, defaults to the europe-west1 GCP host)
//! - `CTP_AUTH_URL` (optional, defaults to the europe-west1 GCP host)
//! - `CTP_CONCURRENCY` (optional, per-item fan-out degree, defaults to 4)

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Default API host when `CTP_API_URL` is unset
pub const DEFAULT_API_URL: &str = "https://api.europe-west1.gcp.commercetools.com";

/// Default auth host when `CTP_AUTH_URL` is unset
pub const DEFAULT_AUTH_URL: &str = "https://auth.europe-west1.gcp.commercetools.com";

/// Default per-item fan-out degree for batch consumers
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Project-level configuration for one API client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project key (path segment of every request)
    pub project_key: String,
    /// OAuth2 client id
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// API host
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Auth host
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Bounded concurrency for per-item batch work
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_auth_url() -> String {
    DEFAULT_AUTH_URL.to_string()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl ProjectConfig {
    /// Create a config with default hosts and concurrency
    pub fn new(
        project_key: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            project_key: project_key.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url: default_api_url(),
            auth_url: default_auth_url(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Override the API host
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Override the auth host
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.auth_url = url.into();
        self
    }

    /// Override the fan-out concurrency
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let project_key = required_var("CTP_PROJECT_KEY")?;
        let client_id = required_var("CTP_CLIENT_ID")?;
        let client_secret = required_var("CTP_CLIENT_SECRET")?;

        let mut config = Self::new(project_key, client_id, client_secret);
        if let Some(url) = optional_var("CTP_API_URL") {
            config.api_url = url;
        }
        if let Some(url) = optional_var("CTP_AUTH_URL") {
            config.auth_url = url;
        }
        if let Some(value) = optional_var("CTP_CONCURRENCY") {
            let parsed = value.parse::<usize>().map_err(|_| {
                Error::config(format!("CTP_CONCURRENCY is not a number: {value}"))
            })?;
            config = config.with_concurrency(parsed);
        }

        Ok(config)
    }

    /// Token endpoint on the auth host
    pub fn token_url(&self) -> String {
        format!("{}/oauth/token", self.auth_url.trim_end_matches('/'))
    }

    /// Default scope requested for the client-credentials flow
    pub fn scope(&self) -> String {
        format!("manage_project:{}", self.project_key)
    }
}

fn required_var(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::missing_field(name)),
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}
