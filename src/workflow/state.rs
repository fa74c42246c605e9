//! Discovery workflow state machine — tracks which step a session is in.

use serde::{Deserialize, Serialize};

/// The steps of the discovery funnel.
///
/// Progresses linearly: IntakeForm → GeneratingQuestions → AwaitingAnswers →
/// GeneratingReport → Results. Each generating step also carries an error
/// edge back to the step that triggered it, preserving entered data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryStep {
    IntakeForm,
    GeneratingQuestions,
    AwaitingAnswers,
    GeneratingReport,
    Results,
}

impl DiscoveryStep {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: DiscoveryStep) -> bool {
        use DiscoveryStep::*;
        matches!(
            (self, target),
            (IntakeForm, GeneratingQuestions)
                | (GeneratingQuestions, AwaitingAnswers)
                | (GeneratingQuestions, IntakeForm)
                | (AwaitingAnswers, GeneratingReport)
                | (GeneratingReport, Results)
                | (GeneratingReport, AwaitingAnswers)
        )
    }

    /// Whether this step is terminal for the session (only a restart leaves it).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Results)
    }

    /// Whether an external call is outstanding in this step. No state-mutating
    /// action is accepted while pending.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::GeneratingQuestions | Self::GeneratingReport)
    }
}

impl Default for DiscoveryStep {
    fn default() -> Self {
        Self::IntakeForm
    }
}

impl std::fmt::Display for DiscoveryStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::IntakeForm => "intake_form",
            Self::GeneratingQuestions => "generating_questions",
            Self::AwaitingAnswers => "awaiting_answers",
            Self::GeneratingReport => "generating_report",
            Self::Results => "results",
        };
        write!(f, "{s}")
    }
}
