//! Backend for any OpenAI-compatible `chat/completions` endpoint
//!
//! Defaults target Cerebras, which serves the Qwen model the prompts were
//! tuned against.

use super::{ChatMessage, GenerationBackend, GenerationRequest, GenerationResponse};
use crate::error::BackendError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_BASE_URL: &str = "https://api.cerebras.ai/v1";
pub const DEFAULT_MODEL: &str = "qwen-3-235b-a22b-instruct-2507";
pub const DEFAULT_API_KEY_ENV: &str = "CEREBRAS_API_KEY";

/// Name given to the schema in `response_format`
const SCHEMA_NAME: &str = "ui_node";

/// Connection settings for [`OpenAiCompatibleBackend`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL without the trailing `/chat/completions`
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Send the tree schema as `response_format` when one is supplied
    pub structured_output: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: None,
            max_tokens: None,
            structured_output: true,
        }
    }
}

impl BackendConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_structured_output(mut self, enabled: bool) -> Self {
        self.structured_output = enabled;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// HTTP backend speaking the OpenAI chat-completions dialect
#[derive(Debug, Clone)]
pub struct OpenAiCompatibleBackend {
    client: Client,
    config: BackendConfig,
    api_key: Option<String>,
}

impl OpenAiCompatibleBackend {
    /// Build a backend, reading the API key from `config.api_key_env`.
    ///
    /// A missing key is not an error here; calls will fail as
    /// [`BackendError::Unauthorized`] instead.
    pub fn from_config(config: BackendConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!(var = %config.api_key_env, "API key not set; backend calls will be rejected");
        }
        Self {
            client: Client::new(),
            config,
            api_key,
        }
    }

    /// Override the API key
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[inline]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ChatMessage::system(request.system.clone()));
        messages.extend(request.messages.iter().cloned());

        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
        });
        if let Some(temperature) = self.config.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let (true, Some(schema)) = (self.config.structured_output, &request.output_schema) {
            body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "schema": schema.as_ref(),
                },
            });
        }
        body
    }
}

fn status_error(status: StatusCode, body: String) -> BackendError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Unauthorized(body),
        StatusCode::TOO_MANY_REQUESTS => BackendError::RateLimited(body),
        other => BackendError::Status {
            code: other.as_u16(),
            body,
        },
    }
}

fn extract_text(completion: ChatCompletion) -> Result<String, BackendError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| BackendError::InvalidResponse("no message content in first choice".into()))
}

#[async_trait]
impl GenerationBackend for OpenAiCompatibleBackend {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            BackendError::Unauthorized(format!("{} is not set", self.config.api_key_env))
        })?;

        let url = self.config.endpoint();
        tracing::debug!(%url, model = %self.config.model, "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_body(&request))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(status_error(status, body));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        extract_text(completion).map(GenerationResponse::new)
    }

    fn name(&self) -> &str {
        "openai-compatible"
    }
}
