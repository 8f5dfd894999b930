//! Email notification about newly available domains

pub mod mailer;
pub mod message;

pub use mailer::{Mailer, RecordingMailer, SmtpMailer};
pub use message::Email;

use chrono::Local;

use crate::config::MailConfig;

/// What happened to the notification of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    Sent { recipient: String },
    /// Credentials incomplete; lists the unset variables
    Skipped { missing: Vec<&'static str> },
    Failed { reason: String },
}

impl NotifyOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotifyOutcome::Sent { .. })
    }
}

/// Sends at most one email per call; failures are reported, never raised
pub struct Notifier {
    config: MailConfig,
    mailer: Box<dyn Mailer>,
}

impl Notifier {
    /// Notifier delivering over SMTP
    pub fn new(config: MailConfig) -> Self {
        let mailer = SmtpMailer::new(config.clone());
        Self::with_mailer(config, mailer)
    }

    pub fn with_mailer(config: MailConfig, mailer: impl Mailer + 'static) -> Self {
        Self {
            config,
            mailer: Box::new(mailer),
        }
    }

    pub async fn notify(&self, domains: &[String]) -> NotifyOutcome {
        let missing = self.config.missing_fields();
        let (from, to) = match (&self.config.user, &self.config.recipient) {
            (Some(from), Some(to)) if missing.is_empty() => (from, to),
            _ => {
                tracing::warn!(missing = ?missing, "Mail configuration incomplete, skipping email");
                return NotifyOutcome::Skipped { missing };
            }
        };

        if domains.is_empty() {
            tracing::debug!("No available domains, nothing to notify");
            return NotifyOutcome::Failed {
                reason: "no domains to report".to_string(),
            };
        }

        let email = message::compose(from, to, domains, &Local::now());
        match self.mailer.send(&email).await {
            Ok(()) => {
                tracing::info!(recipient = %to, count = domains.len(), "Notification email sent");
                NotifyOutcome::Sent {
                    recipient: to.clone(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, server = %self.config.server, "Failed to send notification email");
                NotifyOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
