//! # WhatsApp Webhook Handlers
//!
//! `GET /api/whatsapp` answers the Cloud API verification handshake.
//! `POST /api/whatsapp` receives message deliveries, answers each question
//! in order and always acknowledges with `200 {"status":"ok"}` so the
//! provider does not redeliver the batch.

use super::AppState;
use crate::types::{VerifyParams, WebhookAck};
use admitbot::webhook::WebhookEvent;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

/// Checks a verification request against the configured secret.
///
/// Returns the challenge to echo when the handshake succeeds.
pub fn verify_subscription(params: &VerifyParams, expected_token: Option<&str>) -> Option<String> {
    let expected_token = expected_token?;
    let subscribing = params.mode.as_deref() == Some("subscribe");
    let token_matches = params.verify_token.as_deref() == Some(expected_token);
    if subscribing && token_matches {
        Some(params.challenge.clone().unwrap_or_default())
    } else {
        None
    }
}

/// Handler for the webhook verification handshake.
pub async fn verify_webhook(
    State(app_state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    match verify_subscription(&params, app_state.config.whatsapp_verify_token.as_deref()) {
        Some(challenge) => {
            info!("Webhook verification succeeded.");
            (StatusCode::OK, challenge).into_response()
        }
        None => {
            warn!(mode = ?params.mode, "Webhook verification failed.");
            (StatusCode::FORBIDDEN, "Forbidden").into_response()
        }
    }
}

/// Handler for webhook message deliveries.
///
/// The raw body is parsed here rather than by an extractor so that a
/// malformed delivery is still acknowledged.
pub async fn receive_webhook(State(app_state): State<AppState>, body: Bytes) -> Json<WebhookAck> {
    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("Ignoring undecodable webhook delivery: {e}");
            return Json(WebhookAck::ok());
        }
    };

    let Some(sender) = app_state.whatsapp.as_deref() else {
        warn!(
            messages = event.incoming_messages().len(),
            "WhatsApp sending is not configured; dropping webhook delivery."
        );
        return Json(WebhookAck::ok());
    };

    let summary = app_state
        .answer_client
        .process_webhook(&event, sender)
        .await;
    if summary.total() > 0 {
        info!(
            answered = summary.answered,
            fallback_sent = summary.fallback_sent,
            unreachable = summary.unreachable,
            "Processed webhook delivery."
        );
    }

    Json(WebhookAck::ok())
}

/// Method fallback for the webhook route.
pub async fn whatsapp_method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, POST")],
        "Method Not Allowed",
    )
        .into_response()
}
