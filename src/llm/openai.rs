//! OpenAI chat-completions provider.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LlmSettings;
use crate::error::GenerationError;
use crate::llm::{ChatMessage, CompletionRequest, CompletionResponse, LlmProvider, Role};

const PROVIDER: &str = "openai";

/// OpenAI API provider with secure key handling.
pub struct OpenAiProvider {
    api_key: SecretString,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiProvider {
    /// Create a provider for the given model.
    pub fn new(settings: &LlmSettings, model: impl Into<String>) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GenerationError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            api_key: settings.api_key.clone(),
            api_base: settings.api_base.clone(),
            model: model.into(),
            client,
        })
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: request.messages.iter().map(WireMessage::from).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_response.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, GenerationError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = self.build_request(&request);

        debug!(model = %self.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                provider: PROVIDER.to_string(),
                status,
                body,
            });
        }

        let parsed: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| GenerationError::InvalidResponse {
                    provider: PROVIDER.to_string(),
                    reason: format!("Failed to parse response body: {e}"),
                })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerationError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "No content in response".to_string(),
            })?;

        let (input_tokens, output_tokens) = parsed
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            input_tokens,
            output_tokens,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

impl From<&ChatMessage> for WireMessage {
    fn from(msg: &ChatMessage) -> Self {
        let role = match msg.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role,
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> LlmSettings {
        LlmSettings {
            api_key: SecretString::from("sk-test"),
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o".to_string(),
            chat_model: "gpt-4o-mini".to_string(),
            timeout_secs: 30,
        }
    }

    #[test]
    fn provider_constructs_with_any_key() {
        // Auth failures happen at request time, not construction.
        let provider = OpenAiProvider::new(&settings(), "gpt-4o").unwrap();
        assert_eq!(provider.model_name(), "gpt-4o");
    }

    #[test]
    fn debug_redacts_api_key() {
        let provider = OpenAiProvider::new(&settings(), "gpt-4o").unwrap();
        let debug = format!("{provider:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-test"));
    }

    #[test]
    fn wire_request_carries_json_format_only_when_requested() {
        let provider = OpenAiProvider::new(&settings(), "gpt-4o").unwrap();

        let plain = provider.build_request(&CompletionRequest::new(vec![ChatMessage::user("x")]));
        assert!(plain.response_format.is_none());

        let json = provider.build_request(
            &CompletionRequest::new(vec![ChatMessage::user("x")]).with_json_response(),
        );
        assert_eq!(json.response_format.unwrap().format_type, "json_object");
    }

    #[test]
    fn wire_roles_map_to_api_strings() {
        let msgs = [
            ChatMessage::system("a"),
            ChatMessage::user("b"),
            ChatMessage::assistant("c"),
        ];
        let roles: Vec<&str> = msgs.iter().map(|m| WireMessage::from(m).role).collect();
        assert_eq!(roles, ["system", "user", "assistant"]);
    }
}
