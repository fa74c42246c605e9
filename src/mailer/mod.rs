//! Email dispatch client — renders the report and sends it to both the
//! business and the lead. SMTP via lettre, one attempt per send.

pub mod render;

pub use render::{Branding, render_lead_notification_html, render_report_html};

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::MailerConfig;
use crate::error::DispatchError;
use crate::intake::IntakeRecord;
use crate::report::AutomationReport;

/// Destination of the client copy of the report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email: String,
    pub name: String,
}

/// Sends a rendered report to its two recipients.
///
/// Trait seam so the workflow can fire dispatch in the background against a
/// stub in tests.
#[async_trait]
pub trait ReportMailer: Send + Sync {
    /// Render and send the report twice: lead notification to the business
    /// address, client copy to the recipient. Both sends are attempted; the
    /// operation fails if either send fails. No retries.
    async fn send_report(
        &self,
        recipient: &Recipient,
        intake: &IntakeRecord,
        report: &AutomationReport,
    ) -> Result<(), DispatchError>;
}

/// Production mailer over SMTP.
pub struct SmtpMailer {
    config: MailerConfig,
}

/// One outbound message, fully resolved before any transport work.
#[derive(Debug)]
struct PlannedSend {
    to: String,
    reply_to: Option<String>,
    subject: String,
    html: String,
}

impl SmtpMailer {
    pub fn new(config: MailerConfig) -> Self {
        Self { config }
    }

    fn branding(&self) -> Branding {
        Branding {
            brand_name: self.config.brand_name.clone(),
            booking_url: self.config.booking_url.clone(),
        }
    }

    /// Resolve the two messages for one report: the lead notification to the
    /// business address, then the client copy with the business address as
    /// reply-to.
    fn plan_sends(
        &self,
        recipient: &Recipient,
        intake: &IntakeRecord,
        report: &AutomationReport,
    ) -> [PlannedSend; 2] {
        let report_html = render_report_html(report, &self.branding());
        let notification_html = render_lead_notification_html(recipient, intake, &report_html);

        let company = intake
            .company_name
            .clone()
            .unwrap_or_else(|| recipient.name.clone());

        [
            PlannedSend {
                to: self.config.business_email.clone(),
                reply_to: None,
                subject: format!("[New Lead] {company}: {}", report.scope_title),
                html: notification_html,
            },
            PlannedSend {
                to: recipient.email.clone(),
                reply_to: Some(self.config.business_email.clone()),
                subject: format!("Your AI Automation Analysis: {}", report.scope_title),
                html: report_html,
            },
        ]
    }

    /// Send one HTML email over a fresh SMTP connection (blocking).
    fn send_html(
        config: &MailerConfig,
        to: &str,
        reply_to: Option<&str>,
        subject: &str,
        html: String,
    ) -> Result<(), DispatchError> {
        let mut builder = Message::builder()
            .from(
                config
                    .from_address
                    .parse()
                    .map_err(|e| DispatchError::InvalidAddress {
                        field: "from".to_string(),
                        reason: format!("{e}"),
                    })?,
            )
            .to(to.parse().map_err(|e| DispatchError::InvalidAddress {
                field: "to".to_string(),
                reason: format!("{e}"),
            })?)
            .subject(subject)
            .header(ContentType::TEXT_HTML);

        if let Some(reply_to) = reply_to {
            builder = builder.reply_to(reply_to.parse().map_err(|e| {
                DispatchError::InvalidAddress {
                    field: "reply-to".to_string(),
                    reason: format!("{e}"),
                }
            })?);
        }

        let email = builder
            .body(html)
            .map_err(|e| DispatchError::BuildFailed(e.to_string()))?;

        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = SmtpTransport::relay(&config.smtp_host)
            .map_err(|e| DispatchError::Transport(format!("SMTP relay error: {e}")))?
            .port(config.smtp_port)
            .credentials(creds)
            .build();

        transport
            .send(&email)
            .map_err(|e| DispatchError::SendFailed {
                recipient: to.to_string(),
                reason: e.to_string(),
            })?;

        info!(to, subject, "Report email sent");
        Ok(())
    }
}

#[async_trait]
impl ReportMailer for SmtpMailer {
    async fn send_report(
        &self,
        recipient: &Recipient,
        intake: &IntakeRecord,
        report: &AutomationReport,
    ) -> Result<(), DispatchError> {
        let [business, client] = self.plan_sends(recipient, intake, report);
        let config = self.config.clone();

        // Blocking SMTP work off the async runtime. Both sends are attempted
        // even if the first fails.
        let outcome = tokio::task::spawn_blocking(move || {
            let first = Self::send_html(
                &config,
                &business.to,
                business.reply_to.as_deref(),
                &business.subject,
                business.html,
            );
            let second = Self::send_html(
                &config,
                &client.to,
                client.reply_to.as_deref(),
                &client.subject,
                client.html,
            );
            first.and(second)
        })
        .await
        .map_err(|e| DispatchError::Transport(format!("send task panicked: {e}")))?;

        outcome
    }
}
