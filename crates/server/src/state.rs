//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The `AppState` holds the configuration, the
//! answer client (with its once-loaded reference document) and the optional
//! WhatsApp sender, making them accessible to all request handlers.

use crate::config::AppConfig;
use admitbot::{
    providers::{
        ai::groq::GroqProvider,
        whatsapp::{MessageSender, WhatsAppClient},
    },
    AnswerClient, AnswerClientBuilder, DocumentStore,
};
use std::sync::Arc;
use tracing::{info, warn};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    /// Answers questions from the reference document.
    pub answer_client: Arc<AnswerClient>,
    /// Outbound WhatsApp delivery. `None` when credentials are not configured.
    pub whatsapp: Option<Arc<dyn MessageSender>>,
}

impl AppState {
    /// The store holding the reference document.
    pub fn document_store(&self) -> &DocumentStore {
        &self.answer_client.document_store
    }
}

/// Builds the shared application state from the configuration.
///
/// No network or file I/O happens here; the document is read on first use.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    if config.groq_api_key.is_none() {
        warn!("GROQ_API_KEY is not set; completion requests will be sent unauthenticated.");
    }
    let ai_provider = GroqProvider::new(
        config.groq_api_url.clone(),
        config.groq_api_key.clone(),
        Some(config.groq_model.clone()),
    )?;
    info!(model = %ai_provider.model(), "Initialized completion provider.");

    let document_store = Arc::new(DocumentStore::from_path(&config.document_path));
    let answer_client = AnswerClientBuilder::new()
        .ai_provider(Box::new(ai_provider))
        .document_store(document_store)
        .build()?;

    let whatsapp: Option<Arc<dyn MessageSender>> = match (
        config.whatsapp_token.clone(),
        config.whatsapp_phone_number_id.clone(),
    ) {
        (Some(token), Some(phone_number_id)) => {
            let client = WhatsAppClient::new(
                Some(config.whatsapp_api_url.clone()),
                phone_number_id,
                token,
            )?;
            info!(url = %client.messages_url(), "Initialized WhatsApp sender.");
            Some(Arc::new(client) as Arc<dyn MessageSender>)
        }
        _ => {
            warn!("WHATSAPP_TOKEN or WHATSAPP_PHONE_NUMBER_ID is not set; WhatsApp replies are disabled.");
            None
        }
    };

    if config.whatsapp_verify_token.is_none() {
        warn!("WHATSAPP_VERIFY_TOKEN is not set; webhook verification will always fail.");
    }

    Ok(AppState {
        config: Arc::new(config),
        answer_client: Arc::new(answer_client),
        whatsapp,
    })
}
