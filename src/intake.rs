//! Intake form data model — the business profile collected from a visitor.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Team size bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanySize {
    Solo,
    Small,
    Growing,
    Midsize,
    Enterprise,
}

impl CompanySize {
    /// Human-readable label used in prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Solo => "Just me",
            Self::Small => "2-10 people",
            Self::Growing => "11-50 people",
            Self::Midsize => "51-200 people",
            Self::Enterprise => "200+ people",
        }
    }
}

/// Monthly revenue bracket. Each tier maps to a deterministic annual-savings
/// range that the report prompt instructs the model to stay within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueBracket {
    Starting,
    Early,
    Growing,
    Established,
    Scaled,
}

impl RevenueBracket {
    pub const ALL: [RevenueBracket; 5] = [
        Self::Starting,
        Self::Early,
        Self::Growing,
        Self::Established,
        Self::Scaled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Starting => "Just Starting",
            Self::Early => "Early Stage",
            Self::Growing => "Growing",
            Self::Established => "Established",
            Self::Scaled => "Scaled",
        }
    }

    /// Monthly revenue range for this tier.
    pub fn monthly_range(&self) -> &'static str {
        match self {
            Self::Starting => "< ₹5L/month",
            Self::Early => "₹5-20L/month",
            Self::Growing => "₹20-50L/month",
            Self::Established => "₹50L-2Cr/month",
            Self::Scaled => "₹2Cr+/month",
        }
    }

    /// Annual savings range the report estimate must scale to.
    pub fn savings_range(&self) -> &'static str {
        match self {
            Self::Starting => "₹50K-2L/year",
            Self::Early => "₹2-5L/year",
            Self::Growing => "₹5-10L/year",
            Self::Established => "₹10-25L/year",
            Self::Scaled => "₹25L-1Cr/year",
        }
    }
}

/// The business profile submitted through the intake form.
///
/// Email and phone are the only required fields; everything else is optional
/// and substituted with prompt fallbacks when absent. Immutable once the
/// workflow advances past the intake step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntakeRecord {
    pub company_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub company_size: Option<CompanySize>,
    pub monthly_revenue: Option<RevenueBracket>,
    pub tech_stack: Vec<String>,
    pub other_tech: Option<String>,
    pub process_description: Option<String>,
}

impl IntakeRecord {
    /// Check the required-field invariant: email present and well-formed,
    /// phone present and non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "email".to_string(),
            });
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidField {
                field: "email".to_string(),
                message: "must be a valid email address".to_string(),
            });
        }
        if self.phone.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "phone".to_string(),
            });
        }
        Ok(())
    }

    /// The lead's display name, assembled from the optional name parts.
    pub fn contact_name(&self) -> String {
        let mut parts = Vec::new();
        if let Some(ref first) = self.first_name {
            parts.push(first.trim());
        }
        if let Some(ref last) = self.last_name {
            parts.push(last.trim());
        }
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }

    /// Render the tech stack as a comma-separated label list, expanding the
    /// "Other" entry with the free-text description when present.
    pub fn tech_stack_label(&self) -> Option<String> {
        if self.tech_stack.is_empty() {
            return None;
        }
        let labels: Vec<String> = self
            .tech_stack
            .iter()
            .map(|tool| {
                if tool == "Other" {
                    match self.other_tech.as_deref().map(str::trim) {
                        Some(other) if !other.is_empty() => format!("Other: {other}"),
                        _ => tool.clone(),
                    }
                } else {
                    tool.clone()
                }
            })
            .collect();
        Some(labels.join(", "))
    }
}

/// The follow-up questions produced by the first generative call.
///
/// Carries exactly what the service returned; count validation happens when
/// answers are paired, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet(Vec<String>);

impl QuestionSet {
    pub fn new(questions: Vec<String>) -> Self {
        Self(questions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Answers positionally aligned with a [`QuestionSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(Vec<String>);

impl AnswerSet {
    pub fn new(answers: Vec<String>) -> Self {
        Self(answers)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// One question paired with its answer. Constructed only at the moment the
/// report call is made; read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QAPair {
    pub question: String,
    pub answer: String,
}

impl QAPair {
    /// Pair questions and answers by index.
    ///
    /// Fails when the counts differ or any answer is blank, so a mismatched
    /// question count from the generative service surfaces here as a
    /// validation error rather than a silent truncation.
    pub fn pair(questions: &QuestionSet, answers: &AnswerSet) -> Result<Vec<QAPair>, ValidationError> {
        if questions.len() != answers.len() {
            return Err(ValidationError::AnswerCountMismatch {
                expected: questions.len(),
                got: answers.len(),
            });
        }
        for (index, answer) in answers.as_slice().iter().enumerate() {
            if answer.trim().is_empty() {
                return Err(ValidationError::EmptyAnswer { index: index + 1 });
            }
        }
        Ok(questions
            .as_slice()
            .iter()
            .zip(answers.as_slice())
            .map(|(question, answer)| QAPair {
                question: question.clone(),
                answer: answer.clone(),
            })
            .collect())
    }
}
