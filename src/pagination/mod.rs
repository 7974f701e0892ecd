//! Cursor pagination
//!
//! Turns a single bounded page query into a duplicate-free lazy sequence of
//! pages, without trusting total counts.
//!
//! # Overview
//!
//! The backend refuses to guarantee totals on large datasets, and the
//! dataset may be mutated concurrently while a scan runs. Offset paging is
//! unsafe under both. Instead, every page is requested with the filter
//! `id > "<last seen id>" AND <original filter>` and a forced `id asc`
//! sort, so page *k+1* strictly excludes everything page *k* already
//! delivered.
//!
//! A page shorter than the limit (including an empty one) is the last page.
//! When the dataset size is an exact multiple of the limit this costs one
//! extra request that returns zero items before the sequence recognizes
//! termination; that request is the price of correctness under concurrent
//! writes and is expected.
//!
//! Page fetches are strictly sequential: each request depends on the cursor
//! derived from the previous page, so there is never more than one request
//! in flight. Stopping early is just not asking for the next page.

mod stream;

pub use stream::{paginate, PageStream};

#[cfg(test)]
mod tests;
