//! Error types for the widget's relay client.

use thiserror::Error;

/// Errors that can occur while reaching the relay endpoint.
///
/// The submit flow never surfaces these to the visitor; they degrade to the
/// widget's fixed apology string.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// HTTP request failed or the response body could not be decoded.
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// HTTP client configuration error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Invalid relay endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
