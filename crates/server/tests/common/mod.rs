//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the `admitbot-server`
//! integration tests.
//!
//! - `TestApp`: spawns the real router on a random port, with the completion
//!   endpoint and the WhatsApp Graph API both pointed at one
//!   `httpmock::MockServer`, and the reference document in a temporary file.
//! - Helpers for mounting the common upstream mocks and building webhook
//!   payloads.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use admitbot_server::{
    config::AppConfig,
    router,
    state::{build_app_state, AppState},
};
use anyhow::Result;
use axum::serve;
use httpmock::{Method, Mock, MockServer};
use reqwest::Client;
use serde_json::{json, Value};
use std::{fs, net::SocketAddr, path::PathBuf};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const POLICY_TEXT: &str = "GIKI Undergraduate Admissions Policy. Applicants must secure at least 60% marks in HSSC. The admission test is held in July.";
pub const VERIFY_TOKEN: &str = "giki_whatsapp_verify_123";
pub const WA_TOKEN: &str = "wa-test-token";
pub const PHONE_ID: &str = "746788998528020";
pub const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

/// The path outbound WhatsApp messages are posted to on the mock server.
pub fn messages_path() -> String {
    format!("/v21.0/{PHONE_ID}/messages")
}

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub document_path: PathBuf,
    pub app_state: AppState,
    _document_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application with the reference document present and all
    /// upstream services pointed at the mock server.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(|_| {}).await
    }

    /// Spawns the application after letting the caller adjust the config.
    pub async fn spawn_with(customize: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start_async().await;

        let document_dir = tempdir()?;
        let document_path = document_dir.path().join("pdf-content.txt");
        fs::write(&document_path, POLICY_TEXT)?;

        let mut config = AppConfig {
            port: 0,
            node_env: "test".to_string(),
            document_path: document_path.to_string_lossy().into_owned(),
            groq_api_key: Some("test-groq-key".to_string()),
            groq_api_url: mock_server.url(COMPLETIONS_PATH),
            whatsapp_verify_token: Some(VERIFY_TOKEN.to_string()),
            whatsapp_token: Some(WA_TOKEN.to_string()),
            whatsapp_phone_number_id: Some(PHONE_ID.to_string()),
            whatsapp_api_url: mock_server.url("/v21.0"),
            ..AppConfig::default()
        };
        customize(&mut config);

        let app_state = build_app_state(config).await?;
        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            document_path,
            app_state: app_state_for_harness,
            _document_dir: document_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Mocks a successful completion whose reply is `answer`.
    pub async fn mock_completion(&self, answer: &str) -> Mock<'_> {
        let answer = answer.to_string();
        self.mock_server
            .mock_async(|when, then| {
                when.method(Method::POST)
                    .path(COMPLETIONS_PATH)
                    .header("authorization", "Bearer test-groq-key");
                then.status(200).json_body(json!({
                    "choices": [{ "message": { "role": "assistant", "content": answer } }]
                }));
            })
            .await
    }

    /// Mocks a failing completion endpoint.
    pub async fn mock_completion_failure(&self, status: u16) -> Mock<'_> {
        self.mock_server
            .mock_async(|when, then| {
                when.method(Method::POST).path(COMPLETIONS_PATH);
                then.status(status).body("upstream exploded");
            })
            .await
    }

    /// Mocks the WhatsApp messages endpoint for one recipient and a body
    /// fragment, answering with `status`.
    pub async fn mock_send(&self, to: &str, body_fragment: &str, status: u16) -> Mock<'_> {
        let to_fragment = format!(r#""to":"{to}""#);
        let body_fragment = body_fragment.to_string();
        self.mock_server
            .mock_async(|when, then| {
                when.method(Method::POST)
                    .path(messages_path())
                    .header("authorization", format!("Bearer {WA_TOKEN}"))
                    .body_contains(to_fragment)
                    .body_contains(body_fragment);
                then.status(status)
                    .json_body(json!({ "messages": [{ "id": "wamid.test" }] }));
            })
            .await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// --- Webhook Payload Helpers ---

/// Builds a Cloud API delivery with one text message per `(from, body)` pair,
/// each in its own change.
pub fn text_messages_payload(messages: &[(&str, &str)]) -> Value {
    let changes: Vec<Value> = messages
        .iter()
        .map(|(from, body)| {
            json!({
                "field": "messages",
                "value": {
                    "messaging_product": "whatsapp",
                    "metadata": { "phone_number_id": PHONE_ID },
                    "contacts": [{ "wa_id": from, "profile": { "name": "Applicant" } }],
                    "messages": [{
                        "from": from,
                        "id": format!("wamid.{from}"),
                        "timestamp": "1722945600",
                        "type": "text",
                        "text": { "body": body }
                    }]
                }
            })
        })
        .collect();

    json!({
        "object": "whatsapp_business_account",
        "entry": [{ "id": "102290129340398", "changes": changes }]
    })
}
