//! # WhatsApp Webhook Events
//!
//! Inbound delivery payloads from the WhatsApp Cloud API, and the rules for
//! turning them into `(sender, text)` pairs. Only the fields the relay reads
//! are modelled; everything else in the envelope is ignored.

use serde::Deserialize;

/// The top-level webhook envelope: `{ entry: [{ changes: [{ value }] }] }`.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct WebhookEvent {
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub entry: Option<Vec<WebhookEntry>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct WebhookEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub changes: Option<Vec<WebhookChange>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct WebhookChange {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub value: Option<ChangeValue>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ChangeValue {
    #[serde(default)]
    pub messages: Option<Vec<InboundMessage>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct InboundMessage {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub button: Option<ButtonContent>,
    #[serde(default)]
    pub interactive: Option<InteractiveContent>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TextContent {
    #[serde(default)]
    pub body: Option<String>,
}

/// A tap on a quick-reply button of a template message.
#[derive(Deserialize, Debug, Default, Clone)]
pub struct ButtonContent {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct InteractiveContent {
    #[serde(default)]
    pub button_reply: Option<ReplyOption>,
    #[serde(default)]
    pub list_reply: Option<ReplyOption>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ReplyOption {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// A question extracted from a webhook change, ready to be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub sender: String,
    pub text: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl InboundMessage {
    /// The user's text, taken from the first populated field in priority
    /// order: text body, button text, interactive button reply, list reply.
    pub fn user_text(&self) -> Option<&str> {
        let interactive = self.interactive.as_ref();
        self.text
            .as_ref()
            .and_then(|t| non_empty(&t.body))
            .or_else(|| self.button.as_ref().and_then(|b| non_empty(&b.text)))
            .or_else(|| {
                interactive
                    .and_then(|i| i.button_reply.as_ref())
                    .and_then(|r| non_empty(&r.title))
            })
            .or_else(|| {
                interactive
                    .and_then(|i| i.list_reply.as_ref())
                    .and_then(|r| non_empty(&r.title))
            })
    }
}

impl WebhookChange {
    /// Extracts the sender and trimmed text of the change's first message.
    ///
    /// Returns `None` when there is no message, no sender, or no usable text.
    pub fn incoming_message(&self) -> Option<IncomingMessage> {
        let message = self.value.as_ref()?.messages.as_ref()?.first()?;
        let sender = non_empty(&message.from)?;
        let text = message.user_text()?.trim();
        if text.is_empty() {
            return None;
        }
        Some(IncomingMessage {
            sender: sender.to_string(),
            text: text.to_string(),
        })
    }
}

impl WebhookEvent {
    /// All changes in the event, in delivery order.
    pub fn changes(&self) -> impl Iterator<Item = &WebhookChange> {
        self.entry
            .iter()
            .flatten()
            .flat_map(|entry| entry.changes.iter().flatten())
    }

    /// The answerable messages in the event, in delivery order.
    pub fn incoming_messages(&self) -> Vec<IncomingMessage> {
        self.changes()
            .filter_map(WebhookChange::incoming_message)
            .collect()
    }
}
