//! WHOIS lookup backends.

use async_trait::async_trait;
use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::{DomainWatchError, Result};

/// Something that can fetch the raw WHOIS text for a domain
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    /// Query `server` about `domain` and return the response text
    async fn query(&self, server: &str, domain: &str) -> Result<String>;
}

/// Shells out to the system `whois` client.
///
/// The exit status is ignored: several registries make `whois` exit non-zero
/// for unregistered names while still printing the useful answer.
#[derive(Debug, Clone)]
pub struct WhoisCommand {
    program: String,
}

impl WhoisCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for WhoisCommand {
    fn default() -> Self {
        Self::new("whois")
    }
}

#[async_trait]
impl WhoisLookup for WhoisCommand {
    async fn query(&self, server: &str, domain: &str) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("-h")
            .arg(server)
            .arg(domain)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DomainWatchError::lookup(domain, format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            tracing::debug!(
                domain = %domain,
                server = %server,
                status = %output.status,
                "whois exited unsuccessfully, classifying its output anyway"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Canned response for [`CannedLookup`]
#[derive(Debug, Clone)]
pub enum CannedResponse {
    Text(String),
    Fail(String),
    /// Sleep before answering, to exercise the timeout path
    Hang(Duration),
}

/// In-memory lookup returning prepared answers per domain.
///
/// Unknown domains get an empty response, which classifies as indeterminate.
#[derive(Debug, Clone, Default)]
pub struct CannedLookup {
    responses: HashMap<String, CannedResponse>,
}

impl CannedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, domain: &str, text: &str) -> Self {
        self.responses
            .insert(domain.to_lowercase(), CannedResponse::Text(text.to_string()));
        self
    }

    pub fn with_failure(mut self, domain: &str, reason: &str) -> Self {
        self.responses
            .insert(domain.to_lowercase(), CannedResponse::Fail(reason.to_string()));
        self
    }

    pub fn with_hang(mut self, domain: &str, delay: Duration) -> Self {
        self.responses
            .insert(domain.to_lowercase(), CannedResponse::Hang(delay));
        self
    }
}

#[async_trait]
impl WhoisLookup for CannedLookup {
    async fn query(&self, _server: &str, domain: &str) -> Result<String> {
        match self.responses.get(&domain.to_lowercase()) {
            Some(CannedResponse::Text(text)) => Ok(text.clone()),
            Some(CannedResponse::Fail(reason)) => Err(DomainWatchError::lookup(domain, reason.clone())),
            Some(CannedResponse::Hang(delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(String::new())
            }
            None => Ok(String::new()),
        }
    }
}
