//! Chat-completion client used for every model call.
//!
//! The gateway only needs one capability from the provider: send a prompt together with a
//! system role and get the reply text back. [`CompletionClient`] captures exactly that so the
//! analysis layer can be exercised with a deterministic fake. The production adapter speaks the
//! OpenAI `chat/completions` wire format, which Gemini also exposes.

use crate::config::Config;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

/// Errors surfaced while requesting a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// HTTP client could not be constructed.
    #[error("Failed to initialize completion client: {0}")]
    ClientInit(String),
    /// Provider could not be reached.
    #[error("Completion request failed: {0}")]
    RequestFailed(String),
    /// Provider answered with a non-success status.
    #[error("Completion provider returned {status}: {body}")]
    ProviderError {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Raw response body, useful for diagnosing quota or auth failures.
        body: String,
    },
    /// Provider response could not be decoded or carried no text.
    #[error("Malformed completion response: {0}")]
    InvalidResponse(String),
}

/// Narrow interface over the external completion API.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Return the model reply for `prompt`, sent under the given system role.
    async fn complete(&self, prompt: &str, system_role: &str) -> Result<String, CompletionError>;
}

/// Adapter for OpenAI-compatible `POST {base}/chat/completions` endpoints.
pub struct OpenAiCompletionClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiCompletionClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &Config) -> Result<Self, CompletionError> {
        Self::with_endpoint(
            config.completion_base_url.clone(),
            config.api_key.clone(),
            config.completion_model.clone(),
        )
    }

    /// Build a client for an explicit endpoint, credential, and model.
    pub fn with_endpoint(
        base_url: String,
        api_key: String,
        model: String,
    ) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .user_agent("clearclause/completion")
            .build()
            .map_err(|error| CompletionError::ClientInit(error.to_string()))?;
        Ok(Self {
            http,
            base_url,
            api_key,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str, system_role: &str) -> Result<String, CompletionError> {
        let payload = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_role },
                { "role": "user", "content": prompt },
            ],
        });

        tracing::debug!(
            model = %self.model,
            prompt_chars = prompt.len(),
            "Requesting completion"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                CompletionError::RequestFailed(format!(
                    "failed to reach completion API at {}: {error}",
                    self.base_url
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::ProviderError { status, body });
        }

        let body: ChatCompletionResponse = response.json().await.map_err(|error| {
            CompletionError::InvalidResponse(format!(
                "failed to decode completion response: {error}"
            ))
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::InvalidResponse("response contained no message content".into())
            })
    }
}
