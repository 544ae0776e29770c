//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::relay::{CompletionRelay, RelayConfig};

/// Shared application state.
pub struct AppState {
    /// Relay fronting the upstream completion API.
    pub relay: CompletionRelay,
}

impl AppState {
    /// Create application state configured from the environment.
    ///
    /// # Errors
    /// Returns an error if the relay's HTTP client cannot be created.
    pub fn new() -> Result<Arc<Self>, Box<dyn std::error::Error + Send + Sync>> {
        let config = RelayConfig::from_env();
        if config.api_key.is_none() {
            tracing::warn!("no completion API key configured; every chat turn will fall back");
        }

        let relay = CompletionRelay::new(config)
            .map_err(|e| format!("Failed to create completion relay: {e}"))?;

        Ok(Arc::new(Self { relay }))
    }

    /// Create application state around an existing relay.
    #[must_use]
    pub fn with_relay(relay: CompletionRelay) -> Arc<Self> {
        Arc::new(Self { relay })
    }
}
