//! Report generator — drives the two generative calls and validates shape.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::GenerationError;
use crate::intake::{IntakeRecord, QAPair, QuestionSet};
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};
use crate::report::model::AutomationReport;
use crate::report::prompts;
use crate::report::prompts::PromptDefaults;

/// Tuning for report generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub defaults: PromptDefaults,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            defaults: PromptDefaults::default(),
        }
    }
}

/// Wraps the generative-text service for the two discovery calls.
pub struct ReportGenerator {
    llm: Arc<dyn LlmProvider>,
    config: GeneratorConfig,
}

impl ReportGenerator {
    pub fn new(llm: Arc<dyn LlmProvider>, config: GeneratorConfig) -> Self {
        Self { llm, config }
    }

    /// First call: derive follow-up discovery questions from the intake.
    ///
    /// The downstream service is instructed to produce exactly 3 questions,
    /// but whatever count comes back is passed through unchanged; answer
    /// pairing validates the count later.
    pub async fn derive_follow_up_questions(
        &self,
        intake: &IntakeRecord,
    ) -> Result<QuestionSet, GenerationError> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(prompts::questions_system_prompt()),
            ChatMessage::user(prompts::questions_user_prompt(intake, &self.config.defaults)),
        ])
        .with_temperature(self.config.temperature)
        .with_max_tokens(self.config.max_tokens)
        .with_json_response();

        let response = self.llm.complete(request).await?;
        let payload: QuestionsPayload = parse_object(&response.content)?;

        if payload.questions.len() != 3 {
            warn!(
                count = payload.questions.len(),
                "Generative service returned a non-standard question count"
            );
        }
        info!(count = payload.questions.len(), "Derived follow-up questions");

        Ok(QuestionSet::new(payload.questions))
    }

    /// Second call: derive the automation report from intake + QA pairs.
    ///
    /// Missing list fields parse as empty lists and missing scalars as empty
    /// strings (see [`AutomationReport`]); anything less structured is a
    /// generation error.
    pub async fn derive_automation_report(
        &self,
        intake: &IntakeRecord,
        qa_pairs: &[QAPair],
    ) -> Result<AutomationReport, GenerationError> {
        let request = CompletionRequest::new(vec![
            ChatMessage::system(prompts::report_system_prompt()),
            ChatMessage::user(prompts::report_user_prompt(
                intake,
                qa_pairs,
                &self.config.defaults,
            )),
        ])
        .with_temperature(self.config.temperature)
        .with_max_tokens(self.config.max_tokens)
        .with_json_response();

        let response = self.llm.complete(request).await?;
        let report: AutomationReport = parse_object(&response.content)?;

        info!(title = %report.scope_title, "Derived automation report");
        Ok(report)
    }
}

/// Parse a JSON object out of model output that may carry markdown fences or
/// surrounding prose.
fn parse_object<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T, GenerationError> {
    let json = extract_json_object(content);
    serde_json::from_str(&json).map_err(|e| GenerationError::InvalidResponse {
        provider: "openai".to_string(),
        reason: format!("Response did not match the expected structure: {e}"),
    })
}

/// Extract a JSON object from LLM output that might contain markdown or extra text.
fn extract_json_object(text: &str) -> String {
    let trimmed = text.trim();

    // Already a JSON object
    if trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    // Wrapped in a markdown code block
    if let Some(start) = trimmed.find("```json") {
        let after = &trimmed[start + 7..];
        if let Some(end) = after.find("```") {
            return after[..end].trim().to_string();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        if let Some(end) = after.find("```") {
            let inner = after[..end].trim();
            if inner.starts_with('{') {
                return inner.to_string();
            }
        }
    }

    // Try to find object bounds
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if end > start {
                return trimmed[start..=end].to_string();
            }
        }
    }

    trimmed.to_string()
}

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    questions: Vec<String>,
}
