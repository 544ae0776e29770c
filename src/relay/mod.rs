//! Completion relay between the chat widget and the upstream completion API.
//!
//! The relay is stateless: every call carries the full transcript, a fixed
//! persona is injected ahead of it, and every failure path collapses into a
//! fixed renderable fallback string. Callers never see an error object.

pub mod config;
pub mod error;
mod upstream;
pub mod wire;

pub use config::RelayConfig;
pub use error::RelayError;
pub use wire::{MessageOrigin, RelayRequest, RelayResponse, RelayTurn};

/// Fixed reply returned whenever the upstream call fails.
pub const UPSTREAM_FALLBACK_REPLY: &str = "Thanks for your message! Amanda will get back to you soon. Please feel free to schedule a consultation above.";

/// Outcome class of a relay turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReplyStatus {
    /// The upstream call produced the reply.
    Success,
    /// The upstream call failed and the fixed fallback was substituted.
    Fallback,
}

/// A completed relay turn: renderable text plus its outcome class.
#[derive(Clone, Debug)]
pub struct RelayReply {
    /// Renderable reply text, never empty.
    pub message: String,
    /// Whether the upstream call succeeded.
    pub status: ReplyStatus,
}

/// Stateless proxy in front of the upstream chat-completion API.
///
/// Holds no conversation memory between invocations and is safe to share
/// across arbitrary concurrent callers.
pub struct CompletionRelay {
    config: RelayConfig,
    client: reqwest::Client,
}

impl CompletionRelay {
    /// Create a relay with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| RelayError::HttpClient(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Complete one turn for the transcript, which may be empty.
    ///
    /// Never fails past this boundary: any upstream error is logged and
    /// replaced by [`UPSTREAM_FALLBACK_REPLY`] with
    /// [`ReplyStatus::Fallback`].
    pub async fn complete(&self, transcript: &[RelayTurn]) -> RelayReply {
        match upstream::request_completion(&self.client, transcript, &self.config).await {
            Ok(message) => RelayReply {
                message,
                status: ReplyStatus::Success,
            },
            Err(err) => {
                tracing::warn!("completion call failed: {err}");
                RelayReply {
                    message: UPSTREAM_FALLBACK_REPLY.to_string(),
                    status: ReplyStatus::Fallback,
                }
            }
        }
    }
}
