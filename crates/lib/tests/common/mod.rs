#![allow(dead_code)]
//! # Common Test Utilities
//!
//! This module provides shared utilities for testing, such as mock AI
//! providers, recording message senders and counting document sources, so
//! the relay logic can be exercised without any network access.

use admitbot::document::{DocumentSource, DocumentStore};
use admitbot::providers::{ai::AiProvider, whatsapp::MessageSender};
use admitbot::{AnswerClient, AnswerClientBuilder, RelayError};
use async_trait::async_trait;
use dotenvy::dotenv;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once, RwLock};

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();
    });
}

pub const POLICY_TEXT: &str = "Applicants must score at least 60% in HSSC. The admission test is held in July.";

// --- Mock AI Provider for Logic Testing ---

/// Replays canned responses in order and records every call.
#[derive(Clone, Debug)]
pub struct MockAiProvider {
    pub call_history: Arc<RwLock<Vec<(String, String)>>>,
    pub responses: Arc<RwLock<Vec<Result<String, u16>>>>,
}

impl MockAiProvider {
    pub fn new(responses: Vec<&str>) -> Self {
        Self::with_results(responses.into_iter().map(|r| Ok(r.to_string())).collect())
    }

    /// `Err(status)` entries simulate an upstream error with that status.
    pub fn with_results(responses: Vec<Result<String, u16>>) -> Self {
        Self {
            call_history: Arc::new(RwLock::new(Vec::new())),
            responses: Arc::new(RwLock::new(responses.into_iter().rev().collect())),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.call_history.read().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, RelayError> {
        self.call_history
            .write()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        match self.responses.write().unwrap().pop() {
            Some(Ok(response)) => Ok(response),
            Some(Err(status)) => Err(RelayError::Completion {
                status: Some(status),
                body: "mock upstream failure".to_string(),
            }),
            None => Ok("Default mock response".to_string()),
        }
    }
}

// --- Recording Message Sender ---

/// Records every message it is asked to send. Recipients listed in
/// `failing_recipients` get a delivery error instead.
#[derive(Clone, Debug, Default)]
pub struct RecordingSender {
    pub sent: Arc<RwLock<Vec<(String, String)>>>,
    pub failing_recipients: Arc<HashSet<String>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            sent: Arc::default(),
            failing_recipients: Arc::new(recipients.iter().map(|r| r.to_string()).collect()),
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.read().unwrap().clone()
    }

    pub fn sent_to(&self, recipient: &str) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(to, _)| to == recipient)
            .map(|(_, body)| body)
            .collect()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_message(&self, to: &str, body: &str) -> Result<(), RelayError> {
        self.sent
            .write()
            .unwrap()
            .push((to.to_string(), body.to_string()));
        if self.failing_recipients.contains(to) {
            return Err(RelayError::Delivery {
                status: Some(400),
                body: "recipient rejected".to_string(),
            });
        }
        Ok(())
    }
}

// --- Counting Document Source ---

/// Serves fixed text and counts how many times it was read.
#[derive(Debug, Clone)]
pub struct CountingSource {
    pub text: Option<String>,
    pub reads: Arc<AtomicUsize>,
}

impl CountingSource {
    pub fn new(text: Option<&str>) -> Self {
        Self {
            text: text.map(String::from),
            reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentSource for CountingSource {
    async fn load(&self) -> std::io::Result<String> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.text.clone().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "pdf-content.txt not found")
        })
    }
}

/// Builds an `AnswerClient` over the policy text and the given provider.
/// A base URL on a local port that nothing is listening on.
///
/// The listener is bound to an ephemeral port and dropped immediately, so a
/// request to it fails at connect time without any HTTP response.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("ephemeral port address");
    drop(listener);
    format!("http://{addr}")
}

pub fn answer_client(provider: MockAiProvider) -> AnswerClient {
    let store = DocumentStore::new(Box::new(CountingSource::new(Some(POLICY_TEXT))));
    AnswerClientBuilder::new()
        .ai_provider(Box::new(provider))
        .document_store(Arc::new(store))
        .build()
        .expect("Failed to build AnswerClient")
}
