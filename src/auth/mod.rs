//! Authentication module
//!
//! OAuth2 client-credentials flow against the platform auth host.
//!
//! The `Authenticator` fetches bearer tokens and caches them until shortly
//! before expiry; concurrent requests share a single refresh.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{CachedToken, Credentials};

#[cfg(test)]
mod tests;
