//! Demo chat widget backend — a stateless proxy to the chat-completion
//! endpoint, constrained to on-topic replies and a short reply cap.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerationError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

const MAX_REPLY_TOKENS: u32 = 150;
const TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "\
You are an AI assistant for a business-automation consultancy, an expert in \
business process automation and AI solutions.

IMPORTANT RESTRICTION: You ONLY answer questions related to:
- AI and automation
- Business process optimization
- The consultancy's services and capabilities
- How technology can help businesses save time and money

If a user asks about ANYTHING ELSE (general knowledge, coding help, personal \
advice, other topics), politely decline and redirect them back to automation \
topics.

When questions ARE relevant:
1. Answer questions about automation, AI, and how technology can help businesses
2. Explain how repetitive tasks, customer service, and data processing can be automated
3. Be friendly, concise, and helpful
4. If asked about pricing, mention that pricing depends on scope and invite them to book a free consultation
5. Encourage users to try the AI discovery form or book a call

Keep responses short (2-3 sentences max) unless more detail is specifically requested.
Be enthusiastic about automation possibilities!";

/// One turn of the widget conversation, as sent by the front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// "user" for visitor messages; anything else is treated as a bot turn.
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

/// Stateless conversational proxy. Each call carries the full transcript;
/// nothing is stored between calls.
pub struct ChatAssistant {
    llm: Arc<dyn LlmProvider>,
}

impl ChatAssistant {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Produce one reply for the given transcript.
    pub async fn reply(&self, turns: &[ChatTurn]) -> Result<String, GenerationError> {
        let mut messages = vec![ChatMessage::system(SYSTEM_PROMPT)];
        for turn in turns {
            if turn.kind == "user" {
                messages.push(ChatMessage::user(&turn.message));
            } else {
                messages.push(ChatMessage::assistant(&turn.message));
            }
        }

        debug!(turns = turns.len(), "Generating chat reply");

        let request = CompletionRequest::new(messages)
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_REPLY_TOKENS);
        let response = self.llm.complete(request).await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionResponse, Role};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoProvider {
        last_request: Mutex<Option<CompletionRequest>>,
    }

    #[async_trait]
    impl LlmProvider for EchoProvider {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> Result<CompletionResponse, GenerationError> {
            *self.last_request.lock().unwrap() = Some(request);
            Ok(CompletionResponse {
                content: "Happy to help with automation!".to_string(),
                input_tokens: 0,
                output_tokens: 0,
            })
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn transcript_maps_to_roles_with_reply_cap() {
        let provider = Arc::new(EchoProvider {
            last_request: Mutex::new(None),
        });
        let assistant = ChatAssistant::new(provider.clone());

        let turns = vec![
            ChatTurn {
                kind: "user".to_string(),
                message: "What can you automate?".to_string(),
            },
            ChatTurn {
                kind: "bot".to_string(),
                message: "Lots of things!".to_string(),
            },
            ChatTurn {
                kind: "user".to_string(),
                message: "Like what?".to_string(),
            },
        ];
        let reply = assistant.reply(&turns).await.unwrap();
        assert_eq!(reply, "Happy to help with automation!");

        let request = provider.last_request.lock().unwrap().clone().unwrap();
        assert_eq!(request.messages.len(), 4);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].role, Role::User);
        assert_eq!(request.messages[2].role, Role::Assistant);
        assert_eq!(request.messages[3].role, Role::User);
        assert_eq!(request.max_tokens, Some(MAX_REPLY_TOKENS));
        assert!(!request.json_response);
    }

    #[test]
    fn turn_wire_format_uses_type_tag() {
        let turn: ChatTurn =
            serde_json::from_str(r#"{"type": "user", "message": "hi"}"#).unwrap();
        assert_eq!(turn.kind, "user");
        assert_eq!(turn.message, "hi");
    }
}
