//! Error types for analysis operations.
//!
//! This module defines [`AshareError`] which covers all error cases that can
//! occur when fetching, normalizing, caching, or storing stock data.

use thiserror::Error;

/// Errors that can occur across the ashare crates.
#[derive(Error, Debug)]
pub enum AshareError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a provider.
    #[error("Rate limited by {provider}: retry after {retry_after:?}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// Error parsing data from a provider.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error interacting with the analysis cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Error interacting with the starred-stocks store.
    #[error("Store error: {0}")]
    Store(String),

    /// A stock code the data provider cannot work with.
    #[error("Invalid stock code: {0}")]
    InvalidCode(String),

    /// No provider is configured for the requested operation.
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`AshareError`].
pub type Result<T> = std::result::Result<T, AshareError>;
