use admitbot::RelayError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

pub const NO_MESSAGE_ERROR: &str = "No message provided";
pub const METHOD_NOT_ALLOWED_ERROR: &str = "Method not allowed";
pub const DOCUMENT_UNAVAILABLE_ERROR: &str = "PDF content not available";
pub const COMPLETION_FAILED_ERROR: &str =
    "Sorry, I encountered an error while processing your request.";

/// A custom error type for the server application.
///
/// This enum encapsulates different kinds of errors that can occur within the server,
/// allowing them to be converted into appropriate HTTP responses with a JSON
/// `{"error": ...}` body.
#[derive(Debug)]
pub enum AppError {
    /// The request is missing required input.
    Validation(String),
    /// The route exists but does not accept this method.
    MethodNotAllowed,
    /// Errors originating from `admitbot`.
    Relay(RelayError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

/// Conversion from `RelayError` to `AppError`.
impl From<RelayError> for AppError {
    fn from(err: RelayError) -> Self {
        AppError::Relay(err)
    }
}

/// Conversion from `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            AppError::Validation(message) => {
                warn!("Rejected request: {message}");
                (StatusCode::BAD_REQUEST, json!({ "error": message }))
            }
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": METHOD_NOT_ALLOWED_ERROR }),
            ),
            AppError::Relay(err) => {
                // Log the original error for debugging purposes
                error!("RelayError: {:?}", err);
                match err {
                    RelayError::DocumentUnavailable => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": DOCUMENT_UNAVAILABLE_ERROR }),
                    ),
                    RelayError::Completion { .. } | RelayError::Delivery { .. } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({
                            "error": COMPLETION_FAILED_ERROR,
                            "details": err.to_string(),
                        }),
                    ),
                    RelayError::MissingAiProvider
                    | RelayError::MissingDocumentStore
                    | RelayError::ReqwestClientBuild(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "error": "Server is not configured correctly." }),
                    ),
                }
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred." }),
                )
            }
        };

        (status_code, Json(body)).into_response()
    }
}
