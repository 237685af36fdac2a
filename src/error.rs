//! Error types for the cache and the PokeAPI client
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Errors raised while constructing a cache.
///
/// Once built, a cache never fails: a missing key is `None`, not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Rejected configuration (e.g. a zero interval)
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// The reaper needs a Tokio runtime to be spawned on
    #[error("No Tokio runtime available to run the reaper task")]
    NoRuntime,
}

// == Api Error Enum ==
/// Errors raised by the PokeAPI client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The resource does not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// A resource name that is not a single path segment
    #[error("Invalid resource name: {0}")]
    InvalidName(String),

    /// Any other non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The body was not the JSON we expected
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for cache construction.
pub type Result<T> = std::result::Result<T, CacheError>;
