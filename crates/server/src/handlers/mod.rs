//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `admitbot-server`.
//! The handlers are split into sub-modules by surface: the general endpoints,
//! the HTTP chat endpoint and the WhatsApp webhook.

pub mod chat;
pub mod general;
pub mod whatsapp;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use chat::*;
pub use general::*;
pub use whatsapp::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState};

/// Method fallback for the JSON API routes.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
