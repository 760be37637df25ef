//! # Admissions Question Answering Relay
//!
//! This crate answers questions about the GIKI undergraduate admissions
//! policy. A question arrives from some transport, the policy document is
//! injected into a system prompt, a chat-completion API produces the answer,
//! and the answer is handed back to the caller or delivered over WhatsApp.

pub mod constants;
pub mod document;
pub mod errors;
pub mod prompts;
pub mod providers;
pub mod types;
pub mod webhook;

pub use document::DocumentStore;
pub use errors::RelayError;
pub use types::{AnswerClient, AnswerClientBuilder, ReplyOutcome, WebhookSummary};

use constants::{REFUSAL_SENTENCE, WHATSAPP_FALLBACK_MESSAGE};
use prompts::admissions::build_system_prompt;
use providers::whatsapp::MessageSender;
use tracing::{error, info, warn};
use webhook::{IncomingMessage, WebhookEvent};

impl AnswerClient {
    /// Answers a single question.
    ///
    /// Makes exactly one completion request. An empty reply from the model is
    /// replaced by the refusal sentence, so a successful answer is never empty.
    pub async fn answer(&self, question: &str) -> Result<String, RelayError> {
        let document = self
            .document_store
            .get()
            .await
            .ok_or(RelayError::DocumentUnavailable)?;

        let system_prompt = build_system_prompt(&document);
        let answer = self.ai_provider.generate(&system_prompt, question).await?;

        if answer.is_empty() {
            warn!("[answer] Model returned no content; using the refusal sentence.");
            return Ok(REFUSAL_SENTENCE.to_string());
        }
        Ok(answer)
    }

    /// Answers one WhatsApp question and delivers the reply to its sender.
    ///
    /// Any failure is logged and followed by one best-effort apology.
    pub async fn reply_to(
        &self,
        message: &IncomingMessage,
        sender: &dyn MessageSender,
    ) -> ReplyOutcome {
        let delivered = match self.answer(&message.text).await {
            Ok(answer) => sender.send(&message.sender, &answer).await,
            Err(e) => Err(e),
        };

        match delivered {
            Ok(()) => {
                info!(to = %message.sender, "[reply] Answer delivered.");
                ReplyOutcome::Answered
            }
            Err(e) => {
                error!(to = %message.sender, "[reply] Reply pipeline failed: {e}");
                if send_best_effort(sender, &message.sender, WHATSAPP_FALLBACK_MESSAGE).await {
                    ReplyOutcome::FallbackSent
                } else {
                    ReplyOutcome::Unreachable
                }
            }
        }
    }

    /// Answers every message in a webhook delivery, one at a time, in order.
    ///
    /// A failure for one sender never stops the rest of the batch.
    pub async fn process_webhook(
        &self,
        event: &WebhookEvent,
        sender: &dyn MessageSender,
    ) -> WebhookSummary {
        let mut summary = WebhookSummary::default();
        for message in event.incoming_messages() {
            info!(from = %message.sender, "[webhook] Answering incoming message.");
            summary.record(self.reply_to(&message, sender).await);
        }
        summary
    }
}

/// Sends `text` and reports whether it got through.
///
/// The error, if any, is logged here and goes no further.
async fn send_best_effort(sender: &dyn MessageSender, to: &str, text: &str) -> bool {
    match sender.send(to, text).await {
        Ok(()) => true,
        Err(e) => {
            warn!(to, "[reply] Best-effort fallback send failed: {e}");
            false
        }
    }
}
