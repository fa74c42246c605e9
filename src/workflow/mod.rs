//! Discovery workflow — orchestrates the intake-to-report funnel.
//!
//! Owns the session state and sequences the two generative calls and the
//! email dispatch. A transition only commits after its triggering call fully
//! succeeds and its result validates; every failure reverts one step back
//! with previously-entered data preserved.

pub mod session;
pub mod state;

pub use session::DiscoverySession;
pub use state::DiscoveryStep;

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{Error, ValidationError};
use crate::intake::{AnswerSet, IntakeRecord, QAPair, QuestionSet};
use crate::mailer::{Recipient, ReportMailer};
use crate::report::{AutomationReport, ReportGenerator};

/// User-facing message when question generation fails. The intake is
/// preserved for one-click retry.
pub const QUESTIONS_FAILED_MESSAGE: &str =
    "We couldn't generate your discovery questions. Your details are saved — please try again.";

/// User-facing message when report generation fails. Questions and answers
/// are preserved so the user can resubmit without re-answering.
pub const REPORT_FAILED_MESSAGE: &str =
    "We couldn't generate your report. Your answers are saved — please try again.";

/// Orchestrator for one discovery session.
///
/// Single logical thread of control: the step gates in `submit_*` reject any
/// state-mutating action while a call is outstanding, so at most one external
/// call is in flight per session.
pub struct DiscoveryWorkflow {
    generator: Arc<ReportGenerator>,
    mailer: Option<Arc<dyn ReportMailer>>,
    session: RwLock<DiscoverySession>,
}

impl DiscoveryWorkflow {
    pub fn new(generator: Arc<ReportGenerator>, mailer: Option<Arc<dyn ReportMailer>>) -> Self {
        Self {
            generator,
            mailer,
            session: RwLock::new(DiscoverySession::new()),
        }
    }

    /// Read-only snapshot of the session — the presentation contract.
    pub async fn session(&self) -> DiscoverySession {
        self.session.read().await.clone()
    }

    /// Discard all state and return to a fresh intake form.
    pub async fn restart(&self) {
        let mut session = self.session.write().await;
        info!(session_id = %session.id, "Discovery session restarted");
        session.restart();
    }

    /// Submit the intake form and derive follow-up questions.
    ///
    /// Validation failures never reach the external call. On generation
    /// failure the session reverts to the intake form with the record
    /// preserved.
    pub async fn submit_intake(&self, intake: IntakeRecord) -> Result<QuestionSet, Error> {
        {
            let mut session = self.session.write().await;
            if session.step != DiscoveryStep::IntakeForm {
                return Err(ValidationError::InvalidTransition {
                    step: session.step.to_string(),
                    action: "submit the intake form".to_string(),
                }
                .into());
            }
            intake.validate()?;
            session.intake = Some(intake.clone());
            session.last_error = None;
            session.transition(DiscoveryStep::GeneratingQuestions)?;
            info!(session_id = %session.id, "Intake accepted, generating questions");
        }

        match self.generator.derive_follow_up_questions(&intake).await {
            Ok(questions) => {
                let mut session = self.session.write().await;
                session.questions = Some(questions.clone());
                session.transition(DiscoveryStep::AwaitingAnswers)?;
                info!(
                    session_id = %session.id,
                    count = questions.len(),
                    "Questions ready, awaiting answers"
                );
                Ok(questions)
            }
            Err(e) => {
                let mut session = self.session.write().await;
                session.transition(DiscoveryStep::IntakeForm)?;
                session.last_error = Some(QUESTIONS_FAILED_MESSAGE.to_string());
                warn!(session_id = %session.id, error = %e, "Question generation failed");
                Err(e.into())
            }
        }
    }

    /// Submit the answers and derive the automation report.
    ///
    /// Answers are stored before validation so a failed submit preserves
    /// them. Reaching `Results` triggers email dispatch as a background side
    /// effect — its outcome is logged and never alters the session.
    pub async fn submit_answers(&self, answers: AnswerSet) -> Result<AutomationReport, Error> {
        let (intake, qa_pairs) = {
            let mut session = self.session.write().await;
            if session.step != DiscoveryStep::AwaitingAnswers {
                return Err(ValidationError::InvalidTransition {
                    step: session.step.to_string(),
                    action: "submit answers".to_string(),
                }
                .into());
            }
            session.answers = answers.clone();

            let questions = session
                .questions
                .as_ref()
                .ok_or_else(|| ValidationError::MissingField {
                    field: "questions".to_string(),
                })?;
            let qa_pairs = QAPair::pair(questions, &answers)?;
            let intake = session
                .intake
                .clone()
                .ok_or_else(|| ValidationError::MissingField {
                    field: "intake".to_string(),
                })?;

            session.last_error = None;
            session.transition(DiscoveryStep::GeneratingReport)?;
            info!(session_id = %session.id, "Answers accepted, generating report");
            (intake, qa_pairs)
        };

        match self
            .generator
            .derive_automation_report(&intake, &qa_pairs)
            .await
        {
            Ok(report) => {
                let session_id = {
                    let mut session = self.session.write().await;
                    session.report = Some(report.clone());
                    session.transition(DiscoveryStep::Results)?;
                    info!(session_id = %session.id, "Report ready, session complete");
                    session.id
                };
                self.spawn_dispatch(session_id, &intake, &report);
                Ok(report)
            }
            Err(e) => {
                let mut session = self.session.write().await;
                session.transition(DiscoveryStep::AwaitingAnswers)?;
                session.last_error = Some(REPORT_FAILED_MESSAGE.to_string());
                warn!(session_id = %session.id, error = %e, "Report generation failed");
                Err(e.into())
            }
        }
    }

    /// Fire report dispatch without blocking the results view.
    fn spawn_dispatch(&self, session_id: uuid::Uuid, intake: &IntakeRecord, report: &AutomationReport) {
        let Some(mailer) = self.mailer.clone() else {
            debug!(%session_id, "No mailer configured, skipping report dispatch");
            return;
        };

        let recipient = Recipient {
            email: intake.email.clone(),
            name: intake.contact_name(),
        };
        let intake = intake.clone();
        let report = report.clone();

        tokio::spawn(async move {
            match mailer.send_report(&recipient, &intake, &report).await {
                Ok(()) => info!(%session_id, "Report dispatched to lead and business"),
                Err(e) => warn!(%session_id, error = %e, "Report dispatch failed"),
            }
        });
    }
}
