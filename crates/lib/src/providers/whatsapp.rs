//! # WhatsApp Cloud API Sender
//!
//! Outbound text delivery through the WhatsApp Business Cloud API. Replies
//! longer than the provider's message limit are split into consecutive chunks
//! and sent one after another.

use crate::{
    constants::{DEFAULT_WHATSAPP_API_URL, WHATSAPP_MAX_CHUNK_CHARS},
    errors::RelayError,
};
use async_trait::async_trait;
use dyn_clone::DynClone;
use reqwest::Client as ReqwestClient;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, error};

/// Splits `text` into consecutive slices of at most `max_chars` characters.
///
/// Counts Unicode scalar values, so a multi-byte character is never cut in
/// half. Word boundaries are ignored. Empty input yields no chunks.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

/// A channel that can deliver text to a user.
#[async_trait]
pub trait MessageSender: Send + Sync + Debug + DynClone {
    /// Sends a single message. `body` is assumed to fit the channel's limit.
    async fn send_message(&self, to: &str, body: &str) -> Result<(), RelayError>;

    /// Sends `text` in order, split into chunks of at most 4000 characters.
    ///
    /// Stops at the first failing chunk. Chunks already sent stay sent.
    async fn send(&self, to: &str, text: &str) -> Result<(), RelayError> {
        let chunks = chunk_text(text, WHATSAPP_MAX_CHUNK_CHARS);
        let total = chunks.len();
        for (index, chunk) in chunks.into_iter().enumerate() {
            debug!(to, part = index + 1, total, "Sending message chunk.");
            self.send_message(to, chunk).await?;
        }
        Ok(())
    }
}

dyn_clone::clone_trait_object!(MessageSender);

// --- Cloud API payload ---

#[derive(Serialize)]
struct OutboundMessage<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: OutboundText<'a>,
}

#[derive(Serialize)]
struct OutboundText<'a> {
    body: &'a str,
}

/// Sends messages from one business phone number via the Graph API.
#[derive(Clone)]
pub struct WhatsAppClient {
    client: ReqwestClient,
    api_url: String,
    phone_number_id: String,
    access_token: String,
}

impl Debug for WhatsAppClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppClient")
            .field("api_url", &self.api_url)
            .field("phone_number_id", &self.phone_number_id)
            .finish_non_exhaustive()
    }
}

impl WhatsAppClient {
    /// Creates a new `WhatsAppClient`.
    ///
    /// `api_url` is the versioned Graph API base, e.g.
    /// `https://graph.facebook.com/v21.0`. `None` selects that default.
    pub fn new(
        api_url: Option<String>,
        phone_number_id: String,
        access_token: String,
    ) -> Result<Self, RelayError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(RelayError::ReqwestClientBuild)?;
        let api_url = api_url
            .unwrap_or_else(|| DEFAULT_WHATSAPP_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Ok(Self {
            client,
            api_url,
            phone_number_id,
            access_token,
        })
    }

    /// The endpoint messages are posted to.
    pub fn messages_url(&self) -> String {
        format!("{}/{}/messages", self.api_url, self.phone_number_id)
    }
}

#[async_trait]
impl MessageSender for WhatsAppClient {
    async fn send_message(&self, to: &str, body: &str) -> Result<(), RelayError> {
        let payload = OutboundMessage {
            messaging_product: "whatsapp",
            to,
            kind: "text",
            text: OutboundText { body },
        };

        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::Delivery {
                status: None,
                body: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(to, status = status.as_u16(), "WhatsApp API rejected message.");
            return Err(RelayError::Delivery {
                status: Some(status.as_u16()),
                body: error_text,
            });
        }

        Ok(())
    }
}
