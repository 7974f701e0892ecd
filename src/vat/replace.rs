//! Fetching tax categories and executing the replacement

use super::types::{plan_replacements, TaxCategory};
use crate::batch::BatchProcessor;
use crate::client::CtpClient;
use crate::error::Result;
use crate::pagination::paginate;
use crate::query::QueryDefinition;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// REST endpoint for tax category updates
const TAX_CATEGORIES_REST: &str = "tax-categories";

/// GraphQL endpoint for tax category queries
const TAX_CATEGORIES_GRAPHQL: &str = "taxCategories";

/// Outcome of one replacement run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VatReport {
    /// Categories scanned
    pub categories: usize,
    /// Updates planned (and, unless dry-run, issued)
    pub replacements: usize,
    /// Special cases left for manual resolution
    pub warnings: usize,
    /// Whether updates were only previewed
    pub dry_run: bool,
}

/// Query definition for scanning all tax categories with their rates
pub fn tax_category_query() -> QueryDefinition {
    let document = "\
query getTaxCategories($limit: Int, $sort: [String!], $where: String) {
    taxCategories(limit: $limit, sort: $sort, where: $where) {
        results {
            id
            version
            name
            key
            description
            rates {
                id
                name
                amount
                country
                state
                includedInPrice
            }
        }
    }
}";
    QueryDefinition::new(TAX_CATEGORIES_GRAPHQL)
        .with_document(document)
        .with_limit(500)
}

/// Scan every tax category of the project via cursor pagination
pub async fn fetch_tax_categories(client: &CtpClient) -> Result<Vec<TaxCategory>> {
    let executor = client.graphql();
    let pages = paginate(&executor, tax_category_query());

    let collected = Arc::new(Mutex::new(Vec::new()));
    let processor = BatchProcessor::new(client.concurrency());

    let stats = processor
        .run(pages, |item| {
            let collected = collected.clone();
            async move {
                let category: TaxCategory = serde_json::from_value(item)?;
                collected.lock().await.push(category);
                Ok(())
            }
        })
        .await?;

    info!(
        categories = stats.items,
        pages = stats.pages,
        "Fetched tax categories"
    );

    let categories = Arc::try_unwrap(collected)
        .map(Mutex::into_inner)
        .unwrap_or_default();
    Ok(categories)
}

/// Run the VAT replacement: scan, plan, preview, and (unless `dry_run`)
/// issue one update per planned replacement.
pub async fn run_vat_replacement(client: &CtpClient, dry_run: bool) -> Result<VatReport> {
    let categories = fetch_tax_categories(client).await?;
    let plan = plan_replacements(&categories);

    for warning in &plan.warnings {
        warn!("{warning}");
    }

    for replacement in &plan.replacements {
        info!(
            category = %replacement.category.name,
            "Tax rate would be replaced with:\n{}",
            serde_json::to_string_pretty(&replacement.update_body())?
        );

        if !dry_run {
            info!(category = %replacement.category.name, "Replacing tax rate");
            client
                .update(
                    TAX_CATEGORIES_REST,
                    &replacement.category.id,
                    replacement.category.version,
                    vec![replacement.action.clone()],
                )
                .await?;
            info!(category = %replacement.category.name, "Update finished");
        }
    }

    if dry_run {
        info!(
            "Preview mode: no update was issued. Re-run with --apply to replace \
             the tax rates; resolve all warnings first."
        );
    }

    Ok(VatReport {
        categories: categories.len(),
        replacements: plan.replacements.len(),
        warnings: plan.warnings.len(),
        dry_run,
    })
}
