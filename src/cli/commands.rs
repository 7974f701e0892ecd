//! CLI commands and argument parsing

use clap::{Parser, Subcommand};

/// Bulk pagination and update tooling for commercetools projects
#[derive(Parser, Debug)]
#[command(name = "ctp-bulk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk a resource endpoint page by page and report counts
    Paginate {
        /// Resource endpoint (e.g. "orders", or "taxCategories" with --graphql)
        endpoint: String,

        /// Filter predicate (e.g. 'country = "DE"')
        #[arg(short, long)]
        r#where: Option<String>,

        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,

        /// Use the GraphQL transport instead of REST
        #[arg(long)]
        graphql: bool,

        /// GraphQL document (defaults to an id-only document)
        #[arg(long)]
        document: Option<String>,
    },

    /// Replace German VAT rates (19% -> 16%, 7% -> 5%) across all tax
    /// categories. Previews by default; pass --apply to issue updates.
    ReplaceVat {
        /// Issue the updates instead of previewing them
        #[arg(long)]
        apply: bool,
    },
}
