//! HTTP route handlers for the concierge API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::services::ServeDir;

use crate::relay::{RelayRequest, RelayResponse, ReplyStatus};

use super::state::AppState;

/// Create the API router with all routes.
///
/// The landing page itself is static content served from `static/`; the
/// relay endpoint only accepts `POST`, other methods get a structured 405.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_relay).fallback(method_not_allowed))
        .fallback_service(ServeDir::new("static"))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "amanda-concierge",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Relay one chat turn.
///
/// The body shape is identical on success and failure; only the status code
/// and the text differ, so the widget renders the message either way.
async fn chat_relay(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RelayRequest>,
) -> (StatusCode, Json<RelayResponse>) {
    let reply = state.relay.complete(&request.messages).await;
    let status = match reply.status {
        ReplyStatus::Success => StatusCode::OK,
        ReplyStatus::Fallback => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (
        status,
        Json(RelayResponse {
            message: reply.message,
        }),
    )
}

/// Reject non-POST invocations of the relay endpoint.
async fn method_not_allowed() -> (StatusCode, Json<RelayResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(RelayResponse {
            message: "Method not allowed".to_string(),
        }),
    )
}
