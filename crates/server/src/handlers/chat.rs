//! # Chat Route Handler
//!
//! `POST /api/chat` answers one question synchronously and returns the answer
//! as JSON. Method and CORS handling live in the router.

use super::{AppError, AppState};
use crate::{
    errors::NO_MESSAGE_ERROR,
    types::{ChatRequest, ChatResponse},
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{info, warn};

/// Pulls a usable question out of the request body.
///
/// Blank messages count as missing, and so does any body axum cannot decode.
fn validated_message(payload: Result<Json<ChatRequest>, JsonRejection>) -> Result<String, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(status = %rejection.status(), "Undecodable chat body: {}", rejection.body_text());
        AppError::Validation(NO_MESSAGE_ERROR.to_string())
    })?;
    request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| AppError::Validation(NO_MESSAGE_ERROR.to_string()))
}

/// The handler for the `/api/chat` endpoint.
pub async fn chat_handler(
    State(app_state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = validated_message(payload)?;
    info!(chars = message.chars().count(), "Received chat message.");

    let answer = app_state.answer_client.answer(&message).await?;

    Ok(Json(ChatResponse {
        response: answer,
        status: "success".to_string(),
    }))
}
