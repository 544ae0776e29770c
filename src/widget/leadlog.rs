//! Best-effort lead logging to the spreadsheet webhook.
//!
//! Dispatch runs on a detached task: the submit flow never waits for the
//! webhook and never observes its outcome. Failures go to the diagnostic
//! log only. The webhook schema is deployment configuration, not a load
//! bearing contract.

use chrono::Utc;

use crate::widget::session::SessionContext;

/// Tag prefixed to bot replies so the external log can tell direction apart.
const BOT_RESPONSE_TAG: &str = "BOT_RESPONSE: ";

/// Configuration for the lead-logging webhook.
#[derive(Clone, Debug)]
pub struct LeadLogConfig {
    /// Webhook URL; `None` disables dispatch entirely.
    pub webhook_url: Option<String>,
    /// Lead classification reported with every event.
    pub lead_type: String,
}

impl Default for LeadLogConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            lead_type: "Buyer".to_string(),
        }
    }
}

impl LeadLogConfig {
    /// Create a config with logging disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the webhook URL.
    #[must_use]
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Set the lead classification.
    #[must_use]
    pub fn with_lead_type(mut self, lead_type: impl Into<String>) -> Self {
        self.lead_type = lead_type.into();
        self
    }
}

/// Fire-and-forget logger for lead-tracking events.
#[derive(Clone)]
pub struct LeadLogger {
    config: LeadLogConfig,
    client: reqwest::Client,
}

impl LeadLogger {
    /// Create a logger; a missing webhook URL disables dispatch.
    #[must_use]
    pub fn new(config: LeadLogConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Logger that never dispatches.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(LeadLogConfig::default())
    }

    /// Log a visitor message.
    pub fn log_user_message(&self, text: &str, session: &SessionContext) {
        self.dispatch(text.trim().to_string(), session);
    }

    /// Log a bot reply, tagged with [`BOT_RESPONSE_TAG`].
    pub fn log_bot_reply(&self, text: &str, session: &SessionContext) {
        self.dispatch(format!("{BOT_RESPONSE_TAG}{}", text.trim()), session);
    }

    /// Spawn the webhook call on a detached task.
    ///
    /// Must be called from within a tokio runtime when a webhook is
    /// configured. The caller never observes the outcome.
    fn dispatch(&self, message: String, session: &SessionContext) {
        let Some(url) = self.event_url(&message, session) else {
            return;
        };

        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(err) = client.get(url).send().await {
                tracing::debug!("lead log dispatch failed: {err}");
            }
        });
    }

    /// Build the webhook URL with the event encoded as query parameters.
    fn event_url(&self, message: &str, session: &SessionContext) -> Option<url::Url> {
        let raw = self.config.webhook_url.as_deref()?;
        let mut url = match url::Url::parse(raw) {
            Ok(url) => url,
            Err(err) => {
                tracing::debug!("lead log webhook URL invalid: {err}");
                return None;
            }
        };

        {
            let mut params = url.query_pairs_mut();
            params.append_pair("timestamp", &Utc::now().to_rfc3339());
            params.append_pair("message", message);
            params.append_pair("leadType", &self.config.lead_type);
            params.append_pair("sessionId", &session.id);
        }

        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionContext {
        SessionContext {
            id: "session_1700000000000_abc123xyz".to_string(),
            persisted: true,
        }
    }

    #[test]
    fn test_event_url_carries_all_fields() {
        let logger = LeadLogger::new(
            LeadLogConfig::new()
                .with_webhook_url("https://example.com/exec")
                .with_lead_type("Seller"),
        );

        let url = logger.event_url("BOT_RESPONSE: hello", &session());
        let url = url.map(String::from).unwrap_or_default();

        assert!(url.contains("timestamp="));
        assert!(url.contains("message=BOT_RESPONSE"));
        assert!(url.contains("leadType=Seller"));
        assert!(url.contains("sessionId=session_1700000000000_abc123xyz"));
    }

    #[test]
    fn test_disabled_logger_builds_no_url() {
        let logger = LeadLogger::disabled();
        assert!(logger.event_url("hello", &session()).is_none());
    }

    #[test]
    fn test_invalid_webhook_url_is_swallowed() {
        let logger = LeadLogger::new(LeadLogConfig::new().with_webhook_url("not a url"));
        assert!(logger.event_url("hello", &session()).is_none());
    }

    #[test]
    fn test_dispatch_without_webhook_is_a_no_op() {
        // No runtime here: dispatch must return before spawning anything.
        LeadLogger::disabled().dispatch("hello".to_string(), &session());
    }
}
