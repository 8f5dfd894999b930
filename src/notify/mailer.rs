//! Mail transports

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::timeout;

use crate::config::MailConfig;
use crate::error::{DomainWatchError, Result};
use crate::notify::message::Email;

/// Delivers a composed email
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<()>;
}

/// SMTP submission: connect, STARTTLS, authenticate, send
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    config: MailConfig,
}

impl SmtpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self { config }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let (user, password) = match (&self.config.user, &self.config.password) {
            (Some(user), Some(password)) => (user.clone(), password.clone()),
            _ => return Err(DomainWatchError::mail("SMTP credentials are not configured")),
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.server)
            .map_err(|e| DomainWatchError::mail(format!("cannot prepare TLS for {}: {}", self.config.server, e)))?
            .port(self.config.port)
            .credentials(Credentials::new(user, password))
            .timeout(Some(self.config.timeout))
            .build();

        Ok(transport)
    }

    fn build_message(email: &Email) -> Result<Message> {
        let from: Mailbox = email
            .from
            .parse()
            .map_err(|e| DomainWatchError::mail(format!("invalid sender '{}': {}", email.from, e)))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| DomainWatchError::mail(format!("invalid recipient '{}': {}", email.to, e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(email.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(email.html_body.clone())
            .map_err(|e| DomainWatchError::mail(format!("cannot build message: {}", e)))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        let message = Self::build_message(email)?;
        let transport = self.transport()?;

        tracing::debug!(
            server = %self.config.server,
            port = self.config.port,
            to = %email.to,
            "Submitting notification email"
        );

        // Outer bound in case the server stalls between SMTP commands
        timeout(self.config.timeout, transport.send(message))
            .await?
            .map_err(|e| DomainWatchError::mail(e.to_string()))?;
        Ok(())
    }
}

/// Keeps sent emails in memory instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<Email>>>,
    fail_with: Option<String>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose every delivery fails with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            sent: Arc::default(),
            fail_with: Some(reason.to_string()),
        }
    }

    /// Emails accepted so far; clones share the same record
    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &Email) -> Result<()> {
        if let Some(reason) = &self.fail_with {
            return Err(DomainWatchError::mail(reason.clone()));
        }
        self.sent.lock().push(email.clone());
        Ok(())
    }
}
