use thiserror::Error;

/// Custom error types for the relay library.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("AI provider is missing")]
    MissingAiProvider,
    #[error("Document store is missing")]
    MissingDocumentStore,
    #[error("Reference document is not available")]
    DocumentUnavailable,
    /// The completion endpoint failed. `status` is `None` when no HTTP
    /// response was received or its body could not be decoded.
    #[error("Completion API error ({}): {body}", status_label(.status))]
    Completion { status: Option<u16>, body: String },
    /// The messaging endpoint rejected or never received an outbound message.
    #[error("WhatsApp send error ({}): {body}", status_label(.status))]
    Delivery { status: Option<u16>, body: String },
}

impl RelayError {
    /// The upstream HTTP status carried by `Completion` and `Delivery` errors.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            RelayError::Completion { status, .. } | RelayError::Delivery { status, .. } => *status,
            _ => None,
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no response".to_string(),
    }
}
