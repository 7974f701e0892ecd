//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands};
use crate::client::CtpClient;
use crate::error::{Error, Result};
use crate::executor::QueryExecutor;
use crate::pagination::paginate;
use crate::query::{minimal_document, QueryDefinition};
use crate::vat::run_vat_replacement;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Paginate {
                endpoint,
                r#where,
                limit,
                graphql,
                document,
            } => {
                self.paginate(
                    endpoint,
                    r#where.as_deref(),
                    *limit,
                    *graphql,
                    document.as_deref(),
                )
                .await
            }
            Commands::ReplaceVat { apply } => self.replace_vat(*apply).await,
        }
    }

    /// Walk an endpoint page by page, reporting counts
    async fn paginate(
        &self,
        endpoint: &str,
        where_clause: Option<&str>,
        limit: Option<u32>,
        graphql: bool,
        document: Option<&str>,
    ) -> Result<()> {
        let client = CtpClient::from_env()?;

        let mut definition = QueryDefinition::new(endpoint);
        if let Some(clause) = where_clause {
            definition = definition.with_where(clause);
        }
        if let Some(limit) = limit {
            definition = definition.with_limit(limit);
        }
        if graphql {
            let document = document
                .map(String::from)
                .unwrap_or_else(|| minimal_document(endpoint));
            definition = definition.with_document(document);
        } else if document.is_some() {
            return Err(Error::config("--document only applies with --graphql"));
        }

        let rest;
        let gql;
        let executor: &dyn QueryExecutor = if graphql {
            gql = client.graphql();
            &gql
        } else {
            rest = client.rest();
            &rest
        };

        let mut pages = paginate(executor, definition);
        let mut page_count = 0u64;
        let mut item_count = 0u64;

        while let Some(page) = pages.try_next().await? {
            page_count += 1;
            item_count += page.len() as u64;
            info!(page = page_count, items = page.len(), "Page fetched");
        }

        info!(
            endpoint,
            pages = page_count,
            items = item_count,
            "Pagination complete"
        );
        Ok(())
    }

    /// Run the German VAT replacement (preview unless `apply`)
    async fn replace_vat(&self, apply: bool) -> Result<()> {
        let client = CtpClient::from_env()?;
        let report = run_vat_replacement(&client, !apply).await?;

        info!(
            categories = report.categories,
            replacements = report.replacements,
            warnings = report.warnings,
            dry_run = report.dry_run,
            "VAT replacement finished"
        );
        Ok(())
    }
}
