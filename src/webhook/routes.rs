//! Axum routes for the LINE webhook.
//!
//! `POST /callback` is the trust boundary: nothing acts on an event until
//! its body passes the signature gate.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use secrecy::{ExposeSecret, SecretString};
use tower_http::cors::CorsLayer;

use crate::error::WebhookError;
use crate::line::client::ReplySender;
use crate::onboarding::router::OnboardingRouter;
use crate::signature::verify_line_signature;
use crate::webhook::event::{MessageContent, WebhookEvent, WebhookRequest};

/// Shared state for the webhook routes.
#[derive(Clone)]
pub struct WebhookState {
    pub channel_secret: SecretString,
    pub router: Arc<OnboardingRouter>,
    pub sender: Arc<dyn ReplySender>,
}

/// `GET /` — service metadata.
async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "title": env!("CARGO_PKG_NAME"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
    }))
}

/// Webhook intake failures map to HTTP 400, before any event is acted on.
impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        tracing::warn!("Webhook rejected: {self}");
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// `POST /callback` — called by the LINE platform when users message the bot.
async fn callback(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, WebhookError> {
    let signature = headers
        .get("x-line-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if !verify_line_signature(state.channel_secret.expose_secret(), &body, signature) {
        return Err(WebhookError::InvalidSignature);
    }

    let request: WebhookRequest = serde_json::from_slice(&body)
        .map_err(|e| WebhookError::InvalidPayload(e.to_string()))?;

    for event in request.events {
        let WebhookEvent::Message(event) = event else {
            continue;
        };
        let MessageContent::Text { text } = &event.message else {
            continue;
        };
        let Some(sender_id) = event.source.user_id.as_deref() else {
            tracing::debug!("Message event without a user source, skipping");
            continue;
        };

        if let Some(received_at) = chrono::DateTime::from_timestamp_millis(event.timestamp) {
            tracing::debug!(sender_id = %sender_id, %received_at, "Webhook message event");
        }

        let replies = match state.router.route(sender_id, text).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(sender_id = %sender_id, "Routing failed: {e}");
                return Ok(
                    (StatusCode::INTERNAL_SERVER_ERROR, "RoutingError").into_response()
                );
            }
        };

        // One reply call per message, sequential so delivery order holds.
        for reply in replies {
            if let Err(e) = state.sender.send_reply(&event.reply_token, vec![reply]).await {
                tracing::error!("Reply send failed: {e}");
                return Ok((StatusCode::INTERNAL_SERVER_ERROR, "ReplyError").into_response());
            }
        }
    }

    Ok((StatusCode::OK, "OK").into_response())
}

/// Build the webhook router.
pub fn webhook_routes(state: WebhookState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/callback", post(callback))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
