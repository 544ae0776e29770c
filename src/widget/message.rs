//! Chat message model for the widget transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::relay::wire::{MessageOrigin, RelayTurn};

/// Greeting seeded as the first bot message of every transcript.
pub const GREETING: &str =
    "Hi! I'm Amanda's assistant. How can I help you with your real estate needs today?";

/// A single rendered chat message.
///
/// Immutable once created; the widget only ever appends.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who produced the message.
    pub origin: MessageOrigin,
    /// Message body.
    pub text: String,
    /// Creation time, serialized RFC 3339.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Build a user message stamped with the current time.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            origin: MessageOrigin::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build a bot message stamped with the current time.
    #[must_use]
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            origin: MessageOrigin::Bot,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Wire form sent to the relay.
    #[must_use]
    pub fn to_turn(&self) -> RelayTurn {
        RelayTurn {
            origin: self.origin,
            text: self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_origin() {
        let user = ChatMessage::user("hello");
        assert_eq!(user.origin, MessageOrigin::User);
        assert_eq!(user.text, "hello");

        let bot = ChatMessage::bot("hi");
        assert_eq!(bot.origin, MessageOrigin::Bot);
    }

    #[test]
    fn test_to_turn_drops_timestamp_only() {
        let message = ChatMessage::user("Do you have listings in Chester?");
        let turn = message.to_turn();
        assert_eq!(turn.origin, message.origin);
        assert_eq!(turn.text, message.text);
    }

    #[test]
    fn test_timestamp_serializes_rfc3339() {
        let message = ChatMessage::bot(GREETING);
        let value = serde_json::to_value(&message).unwrap_or_default();
        let timestamp = value
            .get("timestamp")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();
        assert!(timestamp.contains('T'));
        assert!(timestamp.ends_with('Z') || timestamp.contains('+'));
    }
}
