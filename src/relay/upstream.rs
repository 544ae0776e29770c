//! Upstream chat-completion call.
//!
//! Speaks the OpenAI chat-completion shape: request
//! `{model, messages, max_tokens, temperature}`, reply text read from
//! `choices[0].message.content`. The fixed persona is injected as the
//! system message ahead of every transcript.

use serde::{Deserialize, Serialize};

use crate::relay::config::RelayConfig;
use crate::relay::error::RelayError;
use crate::relay::wire::{MessageOrigin, RelayTurn};

/// Persona injected ahead of every transcript.
const PERSONA_PROMPT: &str = "You are Amanda's helpful real estate assistant for the Richmond & Chester Virginia area. Keep responses friendly, helpful, and focused on real estate. Always encourage users to book a consultation. Be knowledgeable about home buying, selling, and the local market.";

/// Substituted when a successful upstream answer carries no usable reply text.
pub(crate) const EMPTY_REPLY_FALLBACK: &str =
    "Sorry, I had trouble processing that. Please try again.";

/// Request a completion for the transcript.
///
/// # Errors
/// Returns an error if the credential is missing, the request fails in
/// transport, the upstream answers with a non-success status, or the body
/// cannot be decoded.
pub(crate) async fn request_completion(
    client: &reqwest::Client,
    transcript: &[RelayTurn],
    config: &RelayConfig,
) -> Result<String, RelayError> {
    let api_key = config.api_key.as_ref().ok_or(RelayError::ApiKeyRequired)?;

    let request = CompletionRequest {
        model: &config.model,
        messages: build_messages(transcript),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    };

    let response = client
        .post(config.endpoint.as_str())
        .bearer_auth(api_key)
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(RelayError::UpstreamStatus(status.as_u16()));
    }

    let body: CompletionResponse = response.json().await?;
    Ok(extract_reply(body))
}

/// Map the transcript into the upstream role vocabulary, persona first and
/// original order preserved.
fn build_messages(transcript: &[RelayTurn]) -> Vec<PromptMessage<'_>> {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(PromptMessage {
        role: "system",
        content: PERSONA_PROMPT,
    });

    for turn in transcript {
        let role = match turn.origin {
            MessageOrigin::User => "user",
            MessageOrigin::Bot => "assistant",
        };
        messages.push(PromptMessage {
            role,
            content: &turn.text,
        });
    }

    messages
}

/// Pull the first choice's text, substituting the fixed fallback when the
/// choice is absent or blank.
fn extract_reply(response: CompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string())
}

// Upstream API request/response structures

#[derive(Serialize)]
struct PromptMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<PromptMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}
