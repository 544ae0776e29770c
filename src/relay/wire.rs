//! Wire types shared by the chat widget and the relay endpoint.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Origin of a chat message.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageOrigin {
    /// Typed by the visitor.
    User,
    /// Produced by the assistant.
    Bot,
}

impl MessageOrigin {
    /// Stable string form for wire payloads and logging.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

impl fmt::Display for MessageOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MessageOrigin {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "bot" => Ok(Self::Bot),
            _ => Err(value.to_string()),
        }
    }
}

/// One transcript turn as the relay consumes it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RelayTurn {
    /// Who produced the text.
    pub origin: MessageOrigin,
    /// Message body.
    pub text: String,
}

/// Request body for `POST /api/chat`: the full visible transcript, oldest first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayRequest {
    /// Transcript turns in insertion order.
    pub messages: Vec<RelayTurn>,
}

/// Response body for `POST /api/chat`.
///
/// The shape is identical on success and failure; callers never branch on
/// an error object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayResponse {
    /// Renderable reply text, never empty.
    pub message: String,
}
