//! CLI module
//!
//! Command-line interface for bulk pagination runs and the VAT
//! replacement.
//!
//! # Commands
//!
//! - `paginate` - Walk a resource endpoint page by page
//! - `replace-vat` - Replace German VAT rates (preview by default)

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
