//! # General Route Handlers
//!
//! The root liveness line and the health check.

use super::AppState;
use crate::types::HealthResponse;
use axum::{extract::State, Json};

/// The handler for the root (`/`) endpoint when no static site is served.
pub async fn root() -> &'static str {
    "admitbot server is running."
}

/// The handler for the health check (`/api/health`) endpoint.
///
/// Reports whether the reference document can be loaded. This triggers the
/// first read when no question has been asked yet. `pdf_length` is counted
/// in UTF-16 code units.
pub async fn health_check(State(app_state): State<AppState>) -> Json<HealthResponse> {
    let document = app_state.document_store().get().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        pdf_loaded: document.is_some(),
        pdf_length: document.map(|d| d.encode_utf16().count()).unwrap_or(0),
        environment: app_state.config.node_env.clone(),
    })
}
