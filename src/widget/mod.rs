//! Client chat widget core for the landing page.
//!
//! This module is the state machine behind the embedded chat surface:
//! - transcript and message model
//! - session correlation for analytics
//! - relay HTTP client
//! - fire-and-forget lead logging
//!
//! Rendering, input capture and the booking calendar belong to the
//! embedding page and stay outside this crate.

pub mod client;
pub mod error;
pub mod leadlog;
pub mod message;
pub mod session;

pub use client::{CompletionClient, HttpRelayClient};
pub use error::WidgetError;
pub use leadlog::{LeadLogConfig, LeadLogger};
pub use message::{ChatMessage, GREETING};
pub use session::{InMemorySessionStore, SessionContext, SessionStore, SessionStoreError};

/// Apology substituted when the relay itself cannot be reached.
pub const RELAY_UNREACHABLE_REPLY: &str = "Thanks for your message! Amanda will get back to you soon. In the meantime, feel free to schedule a consultation using the calendar above.";

/// Outcome of a submit call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// A bot reply was appended to the transcript.
    Replied,
    /// Blank input or a round trip already in flight; nothing changed.
    Ignored,
}

/// Chat widget state machine.
///
/// Owns the visible transcript for one page view and guards a single
/// outstanding relay round trip. New submissions are suspended while a
/// reply is pending; reading the transcript and the typing indicator stays
/// available throughout.
pub struct ChatWidget<C> {
    transcript: Vec<ChatMessage>,
    awaiting_reply: bool,
    relay: C,
    logger: LeadLogger,
}

impl<C: CompletionClient> ChatWidget<C> {
    /// Create a widget seeded with the greeting message.
    #[must_use]
    pub fn new(relay: C, logger: LeadLogger) -> Self {
        Self {
            transcript: vec![ChatMessage::bot(GREETING)],
            awaiting_reply: false,
            relay,
            logger,
        }
    }

    /// Visible transcript, oldest first.
    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Whether the typing indicator should show.
    #[must_use]
    pub const fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Run one full round trip for the visitor's input.
    ///
    /// Blank input and overlapping submits are no-ops. Neither the relay
    /// call nor the lead-log events can fail past this method: a transport
    /// failure degrades to [`RELAY_UNREACHABLE_REPLY`] and logging is fire
    /// and forget.
    pub async fn submit(&mut self, input: &str, session: &SessionContext) -> SubmitOutcome {
        let Some(user_text) = self.begin_turn(input) else {
            return SubmitOutcome::Ignored;
        };
        self.logger.log_user_message(&user_text, session);

        let reply = match self.relay.request_reply(&self.transcript).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!("relay call failed: {err}");
                RELAY_UNREACHABLE_REPLY.to_string()
            }
        };

        let bot_text = self.finish_turn(reply);
        self.logger.log_bot_reply(&bot_text, session);
        SubmitOutcome::Replied
    }

    /// Guard and record the user side of a turn. Returns the accepted text,
    /// or `None` when the input is blank or a reply is already pending.
    fn begin_turn(&mut self, input: &str) -> Option<String> {
        let text = input.trim();
        if text.is_empty() || self.awaiting_reply {
            return None;
        }

        self.transcript.push(ChatMessage::user(text));
        self.awaiting_reply = true;
        Some(text.to_string())
    }

    /// Record the bot side of a turn and release the input guard.
    fn finish_turn(&mut self, reply: String) -> String {
        let message = ChatMessage::bot(reply);
        let text = message.text.clone();
        self.transcript.push(message);
        self.awaiting_reply = false;
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::wire::MessageOrigin;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Relay stand-in recording how many messages each call received.
    struct StubRelay {
        reply: Option<String>,
        seen_lengths: Mutex<Vec<usize>>,
    }

    impl StubRelay {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(text.to_string()),
                seen_lengths: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                seen_lengths: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.seen_lengths.lock().map(|seen| seen.len()).unwrap_or(0)
        }
    }

    #[async_trait]
    impl CompletionClient for Arc<StubRelay> {
        async fn request_reply(&self, transcript: &[ChatMessage]) -> Result<String, WidgetError> {
            if let Ok(mut seen) = self.seen_lengths.lock() {
                seen.push(transcript.len());
            }
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(WidgetError::HttpClient("connection refused".to_string())),
            }
        }
    }

    fn session() -> SessionContext {
        SessionContext::transient()
    }

    #[tokio::test]
    async fn test_submit_appends_user_and_bot_messages() {
        let relay = StubRelay::replying("Yes! Let's schedule a call.");
        let mut widget = ChatWidget::new(Arc::clone(&relay), LeadLogger::disabled());

        let outcome = widget
            .submit("Do you have listings in Chester?", &session())
            .await;

        assert_eq!(outcome, SubmitOutcome::Replied);
        let transcript = widget.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].origin, MessageOrigin::User);
        assert_eq!(transcript[1].text, "Do you have listings in Chester?");
        assert_eq!(transcript[2].origin, MessageOrigin::Bot);
        assert_eq!(transcript[2].text, "Yes! Let's schedule a call.");
        assert!(!widget.is_awaiting_reply());
    }

    #[tokio::test]
    async fn test_submit_sends_the_full_transcript() {
        let relay = StubRelay::replying("Sure.");
        let mut widget = ChatWidget::new(Arc::clone(&relay), LeadLogger::disabled());

        let _ = widget.submit("First question", &session()).await;
        let _ = widget.submit("Second question", &session()).await;

        let seen = relay.seen_lengths.lock().map(|s| s.clone()).unwrap_or_default();
        // Greeting plus each accepted user message, resent in full every turn.
        assert_eq!(seen, vec![2, 4]);
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let relay = StubRelay::replying("Sure.");
        let mut widget = ChatWidget::new(Arc::clone(&relay), LeadLogger::disabled());

        assert_eq!(widget.submit("", &session()).await, SubmitOutcome::Ignored);
        assert_eq!(
            widget.submit("   \n", &session()).await,
            SubmitOutcome::Ignored
        );
        assert_eq!(widget.transcript().len(), 1);
        assert_eq!(relay.calls(), 0);
    }

    #[tokio::test]
    async fn test_relay_failure_degrades_to_apology() {
        let relay = StubRelay::failing();
        let mut widget = ChatWidget::new(Arc::clone(&relay), LeadLogger::disabled());

        let outcome = widget.submit("Hello?", &session()).await;

        assert_eq!(outcome, SubmitOutcome::Replied);
        let transcript = widget.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].text, RELAY_UNREACHABLE_REPLY);
        assert!(!widget.is_awaiting_reply());
    }

    #[tokio::test]
    async fn test_pending_reply_blocks_new_turns() {
        let relay = StubRelay::replying("Sure.");
        let mut widget = ChatWidget::new(Arc::clone(&relay), LeadLogger::disabled());

        assert!(widget.begin_turn("First question").is_some());
        assert!(widget.is_awaiting_reply());

        // Guard holds until the pending turn settles.
        assert!(widget.begin_turn("Second question").is_none());
        assert_eq!(widget.transcript().len(), 2);

        let _ = widget.finish_turn("Sure.".to_string());
        assert!(widget.begin_turn("Second question").is_some());
    }
}
