use crate::{
    constants::{
        COMPLETION_MAX_TOKENS, COMPLETION_TEMPERATURE, DEFAULT_COMPLETION_API_URL,
        DEFAULT_COMPLETION_MODEL,
    },
    errors::RelayError,
    providers::ai::AiProvider,
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, error};

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// --- Groq Provider implementation ---

/// A provider for Groq's OpenAI-compatible chat completions API.
///
/// Any endpoint speaking the same protocol works; the URL and model are
/// configurable. Sampling is fixed at temperature 0.7 and 1000 output tokens.
#[derive(Clone)]
pub struct GroqProvider {
    client: ReqwestClient,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl Debug for GroqProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqProvider")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

impl GroqProvider {
    /// Creates a new `GroqProvider`.
    pub fn new(
        api_url: String,
        api_key: Option<String>,
        model: Option<String>,
    ) -> Result<Self, RelayError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(RelayError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
        })
    }

    /// Creates a provider for the public Groq endpoint with the default model.
    pub fn with_api_key(api_key: String) -> Result<Self, RelayError> {
        Self::new(DEFAULT_COMPLETION_API_URL.to_string(), Some(api_key), None)
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl AiProvider for GroqProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, RelayError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            temperature: COMPLETION_TEMPERATURE,
            max_tokens: COMPLETION_MAX_TOKENS,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
        };

        let mut request_builder = self.client.post(&self.api_url);

        if let Some(key) = &self.api_key {
            request_builder = request_builder.bearer_auth(key);
        }

        debug!(model = %self.model, "Sending chat completion request.");
        let response = request_builder
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RelayError::Completion {
                status: None,
                body: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Completion API returned an error.");
            return Err(RelayError::Completion {
                status: Some(status.as_u16()),
                body: error_text,
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| RelayError::Completion {
                status: None,
                body: format!("Failed to deserialize completion response: {e}"),
            })?;

        let answer = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        Ok(answer.trim().to_string())
    }
}
