//! Error types for the completion relay.

use thiserror::Error;

/// Errors that can occur while calling the upstream completion API.
///
/// None of these escape [`crate::relay::CompletionRelay::complete`]; they
/// are collapsed into the fixed fallback reply at that boundary.
#[derive(Debug, Error)]
pub enum RelayError {
    /// HTTP request failed or the response body could not be decoded.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Upstream answered with a non-success status.
    #[error("completion API returned status: {0}")]
    UpstreamStatus(u16),

    /// API key required but not configured.
    #[error("API key required for the completion API")]
    ApiKeyRequired,
}
