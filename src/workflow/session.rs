//! Session value — all state accumulated during one discovery run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::intake::{AnswerSet, IntakeRecord, QuestionSet};
use crate::report::AutomationReport;
use crate::workflow::state::DiscoveryStep;

/// The explicit, serializable state of one discovery session.
///
/// Owned by the workflow; the presentation layer receives read-only
/// snapshots. State lives only for the duration of the session — there is no
/// persistence layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverySession {
    pub id: Uuid,
    pub step: DiscoveryStep,
    pub intake: Option<IntakeRecord>,
    pub questions: Option<QuestionSet>,
    pub answers: AnswerSet,
    pub report: Option<AutomationReport>,
    /// User-facing message from the last failed step, if any.
    pub last_error: Option<String>,
    pub started_at: DateTime<Utc>,
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            step: DiscoveryStep::default(),
            intake: None,
            questions: None,
            answers: AnswerSet::default(),
            report: None,
            last_error: None,
            started_at: Utc::now(),
        }
    }

    /// Move to `target`, enforcing the transition table.
    pub fn transition(&mut self, target: DiscoveryStep) -> Result<(), ValidationError> {
        if !self.step.can_transition_to(target) {
            return Err(ValidationError::InvalidTransition {
                step: self.step.to_string(),
                action: format!("transition to {target}"),
            });
        }
        self.step = target;
        Ok(())
    }

    /// Reset to a fresh intake form with a new session id.
    pub fn restart(&mut self) {
        *self = Self::new();
    }
}

impl Default for DiscoverySession {
    fn default() -> Self {
        Self::new()
    }
}
