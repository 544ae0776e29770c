//! Widget-side client for the relay endpoint.

use async_trait::async_trait;

use crate::relay::wire::{RelayRequest, RelayResponse};
use crate::widget::error::WidgetError;
use crate::widget::message::ChatMessage;

/// Seam between the widget and the relay transport.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Request a reply for the full visible transcript.
    ///
    /// # Errors
    /// Returns an error if the relay cannot be reached or its response
    /// cannot be decoded.
    async fn request_reply(&self, transcript: &[ChatMessage]) -> Result<String, WidgetError>;
}

/// HTTP implementation posting the transcript to the relay endpoint.
pub struct HttpRelayClient {
    client: reqwest::Client,
    endpoint: url::Url,
}

impl HttpRelayClient {
    /// Create a client for the given relay endpoint.
    ///
    /// # Errors
    /// Returns an error if the endpoint is not a valid URL or the HTTP
    /// client cannot be created.
    pub fn new(endpoint: &str) -> Result<Self, WidgetError> {
        let endpoint = url::Url::parse(endpoint)?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| WidgetError::HttpClient(e.to_string()))?;

        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl CompletionClient for HttpRelayClient {
    async fn request_reply(&self, transcript: &[ChatMessage]) -> Result<String, WidgetError> {
        let request = RelayRequest {
            messages: transcript.iter().map(ChatMessage::to_turn).collect(),
        };

        // The relay answers with the same body shape on success and on
        // failure; both carry renderable text, so the status code is not
        // checked here.
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let body: RelayResponse = response.json().await?;
        Ok(body.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_request_reply_posts_transcript() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{"origin": "user", "text": "Do you have listings in Chester?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "Yes! Let's schedule a call."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpRelayClient::new(&format!("{}/api/chat", server.uri())).unwrap();
        let reply = client
            .request_reply(&[ChatMessage::user("Do you have listings in Chester?")])
            .await;

        assert_eq!(reply.ok().as_deref(), Some("Yes! Let's schedule a call."));
    }

    #[tokio::test]
    async fn test_failure_body_is_still_renderable() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "message": "Thanks for your message! Amanda will get back to you soon. Please feel free to schedule a consultation above."
            })))
            .mount(&server)
            .await;

        let client = HttpRelayClient::new(&format!("{}/api/chat", server.uri())).unwrap();
        let reply = client.request_reply(&[ChatMessage::user("Hello")]).await;

        let text = reply.ok().unwrap_or_default();
        assert!(text.starts_with("Thanks for your message!"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let client = HttpRelayClient::new(&format!("{}/api/chat", server.uri())).unwrap();
        let reply = client.request_reply(&[ChatMessage::user("Hello")]).await;

        assert!(reply.is_err());
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        assert!(HttpRelayClient::new("not a url").is_err());
    }
}
