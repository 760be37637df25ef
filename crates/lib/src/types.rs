use crate::{document::DocumentStore, errors::RelayError, providers::ai::AiProvider};
use std::fmt;
use std::sync::Arc;

/// Answers admissions questions from the reference document.
///
/// Shared by the HTTP and WhatsApp surfaces; cheap to clone.
#[derive(Clone)]
pub struct AnswerClient {
    pub ai_provider: Box<dyn AiProvider>,
    pub document_store: Arc<DocumentStore>,
}

impl fmt::Debug for AnswerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerClient")
            .field("ai_provider", &self.ai_provider)
            .field("document_loaded", &self.document_store.is_loaded())
            .finish()
    }
}

/// A builder for creating `AnswerClient` instances.
#[derive(Default)]
pub struct AnswerClientBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    document_store: Option<Arc<DocumentStore>>,
}

impl AnswerClientBuilder {
    /// Creates a new `AnswerClientBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the AI provider used to generate answers.
    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    /// Sets the store holding the reference document.
    pub fn document_store(mut self, document_store: Arc<DocumentStore>) -> Self {
        self.document_store = Some(document_store);
        self
    }

    /// Builds the `AnswerClient`.
    ///
    /// Fails if either the AI provider or the document store was not set.
    pub fn build(self) -> Result<AnswerClient, RelayError> {
        let ai_provider = self.ai_provider.ok_or(RelayError::MissingAiProvider)?;
        let document_store = self
            .document_store
            .ok_or(RelayError::MissingDocumentStore)?;
        Ok(AnswerClient {
            ai_provider,
            document_store,
        })
    }
}

/// What happened to a single WhatsApp question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// The model's answer was delivered in full.
    Answered,
    /// Answering or delivery failed and the apology was sent instead.
    FallbackSent,
    /// Answering or delivery failed and so did the apology.
    Unreachable,
}

/// Per-batch tally of reply outcomes, used for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WebhookSummary {
    pub answered: usize,
    pub fallback_sent: usize,
    pub unreachable: usize,
}

impl WebhookSummary {
    pub fn record(&mut self, outcome: ReplyOutcome) {
        match outcome {
            ReplyOutcome::Answered => self.answered += 1,
            ReplyOutcome::FallbackSent => self.fallback_sent += 1,
            ReplyOutcome::Unreachable => self.unreachable += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.answered + self.fallback_sent + self.unreachable
    }
}
