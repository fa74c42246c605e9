//! Generative-text provider abstraction.
//!
//! A thin async trait over chat-completion services plus the OpenAI
//! implementation used in production. The workflow and generators depend only
//! on the trait, so tests can substitute canned providers.

pub mod openai;

pub use openai::OpenAiProvider;

use async_trait::async_trait;

use crate::error::GenerationError;

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a chat completion request.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A chat completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// Ask the provider for a JSON-object response where supported.
    pub json_response: bool,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
            json_response: false,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_json_response(mut self) -> Self {
        self.json_response = true;
        self
    }
}

/// A chat completion response.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Provider of chat completions.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run a single completion. One attempt, no retries.
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResponse, GenerationError>;

    /// Model identifier used by this provider.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builders() {
        let request = CompletionRequest::new(vec![
            ChatMessage::system("sys"),
            ChatMessage::user("hi"),
        ])
        .with_temperature(0.7)
        .with_max_tokens(150)
        .with_json_response();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.max_tokens, Some(150));
        assert!(request.json_response);
    }

    #[test]
    fn message_constructors() {
        assert_eq!(ChatMessage::user("a").role, Role::User);
        assert_eq!(ChatMessage::assistant("b").role, Role::Assistant);
        assert_eq!(ChatMessage::system("c").content, "c");
    }
}
