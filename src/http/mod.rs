//! HTTP transport with retry and rate limiting
//!
//! Everything retry- and throttle-shaped lives here. The pagination core
//! treats this layer as a black box: a request either succeeds or surfaces
//! a transport error that terminates the run.

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
