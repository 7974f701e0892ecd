//! # ctp-bulk
//!
//! Cursor-based bulk read and update tooling for commercetools projects.
//!
//! Turns a single bounded page query into a duplicate-free lazy sequence
//! of pages, over either the REST or the GraphQL transport, and layers a
//! bounded-concurrency batch consumer on top for item-level work. Ships
//! with one concrete bulk operation: the German VAT rate replacement.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ctp_bulk::client::CtpClient;
//! use ctp_bulk::pagination::paginate;
//! use ctp_bulk::query::QueryDefinition;
//! use ctp_bulk::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = CtpClient::from_env()?;
//!     let executor = client.rest();
//!
//!     let definition = QueryDefinition::new("orders")
//!         .with_where(r#"country = "DE""#)
//!         .with_limit(100);
//!
//!     let mut pages = paginate(&executor, definition);
//!     while let Some(page) = pages.try_next().await? {
//!         for order in page {
//!             // Process order
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                     CtpClient                          │
//! │  rest() / graphql() → executors    update() / delete() │
//! └────────────────────────────────────────────────────────┘
//!                │                            │
//! ┌──────────────┴─────────────┐  ┌───────────┴────────────┐
//! │   PageStream (pagination)  │  │  HttpClient + OAuth2   │
//! │   cursor: id > last, asc   │  │  retry, rate limiting  │
//! └──────────────┬─────────────┘  └────────────────────────┘
//!                │
//! ┌──────────────┴─────────────┐
//! │  BatchProcessor (fan-out)  │
//! └────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Project configuration from the environment
pub mod config;

/// OAuth2 client-credentials authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Query definitions and response envelopes
pub mod query;

/// Transport executors (REST and GraphQL)
pub mod executor;

/// Cursor pagination
pub mod pagination;

/// Bounded-concurrency batch consumption
pub mod batch;

/// Project client and write-back surface
pub mod client;

/// German VAT rate replacement
pub mod vat;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use batch::{BatchProcessor, BatchStats};
pub use client::CtpClient;
pub use executor::{GraphQlExecutor, QueryExecutor, RestExecutor};
pub use pagination::{paginate, PageStream};
pub use query::{QueryDefinition, ResultEnvelope, DEFAULT_PAGE_SIZE};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
