//! Text-generation backend contract
//!
//! The orchestrator never talks to a model directly. It hands a
//! [`GenerationRequest`] to whatever [`GenerationBackend`] it was built with
//! and treats the returned text as untrusted, whatever the backend claims
//! about schema conformance.

mod openai;

pub use openai::{BackendConfig, OpenAiCompatibleBackend};

use crate::error::BackendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Speaker of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[inline]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    #[inline]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// One call to the model
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// System instruction
    pub system: String,
    /// Conversation turns after the system instruction
    pub messages: Vec<ChatMessage>,
    /// JSON Schema the output must follow, for backends that can enforce one
    pub output_schema: Option<Arc<Value>>,
}

impl GenerationRequest {
    /// The last user turn, if any
    #[must_use]
    pub fn user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResponse {
    /// Raw model output; may or may not be JSON
    pub text: String,
}

impl GenerationResponse {
    #[inline]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Anything that can turn a request into text
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Run one generation
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: GenerationBackend + ?Sized> GenerationBackend for Arc<T> {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, BackendError> {
        (**self).generate(request).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_content_picks_last_user_turn() {
        let request = GenerationRequest {
            system: "sys".into(),
            messages: vec![
                ChatMessage::user("first"),
                ChatMessage {
                    role: Role::Assistant,
                    content: "reply".into(),
                },
                ChatMessage::user("second"),
            ],
            output_schema: None,
        };
        assert_eq!(request.user_content(), Some("second"));
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_value(ChatMessage::system("x")).unwrap();
        assert_eq!(json, serde_json::json!({ "role": "system", "content": "x" }));
    }
}
