//! Configuration for the completion relay.

use core::fmt;
use std::time::Duration;

/// Default upstream chat-completion endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default completion model.
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default cap on generated reply length, in tokens.
const DEFAULT_MAX_TOKENS: u32 = 200;

/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Environment variable holding the upstream credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Configuration for the relay's upstream call.
///
/// Reply length and temperature are policy knobs, not protocol; tuning them
/// does not break the relay contract.
#[derive(Clone)]
pub struct RelayConfig {
    /// Upstream chat-completion endpoint.
    pub endpoint: String,
    /// Model to request.
    pub model: String,
    /// Cap on generated reply length, in tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout.
    pub request_timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Bearer credential; stays server-side and is never logged.
    pub api_key: Option<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            api_key: None,
        }
    }
}

impl RelayConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with the credential read from [`API_KEY_ENV`].
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            ..Self::default()
        }
    }

    /// Set the upstream endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the completion model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the bearer credential.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

// The credential must never reach log output, so Debug redacts it.
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 200);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = RelayConfig::new()
            .with_endpoint("http://127.0.0.1:9000/v1/chat/completions")
            .with_model("gpt-4o-mini")
            .with_timeout(Duration::from_secs(60))
            .with_api_key("test-key");

        assert_eq!(config.endpoint, "http://127.0.0.1:9000/v1/chat/completions");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.api_key, Some("test-key".to_string()));
    }

    #[test]
    fn test_debug_redacts_credential() {
        let config = RelayConfig::new().with_api_key("sk-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
