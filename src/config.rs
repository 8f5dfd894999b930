//! Run configuration resolved once from the environment.
//!
//! Nothing in the crate reads environment variables after startup: `main`
//! builds a [`MonitorConfig`] and hands the pieces to each component.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{DomainWatchError, Result};
use crate::types::CheckConfig;

pub const DEFAULT_SMTP_SERVER: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_WATCHLIST_FILE: &str = "watchlist.txt";
pub const RESULT_FILE: &str = "available_domains.txt";
/// Variable naming the scheduled-job output file (GitHub Actions convention)
pub const TRIGGER_OUTPUT_VAR: &str = "GITHUB_OUTPUT";
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// SMTP connection parameters
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub server: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub recipient: Option<String>,
    pub timeout: Duration,
}

impl MailConfig {
    /// Names of the credential variables that are not set
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.user.is_none() {
            missing.push("SMTP_USER");
        }
        if self.password.is_none() {
            missing.push("SMTP_PASSWORD");
        }
        if self.recipient.is_none() {
            missing.push("NOTIFY_EMAIL");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SMTP_SERVER.to_string(),
            port: DEFAULT_SMTP_PORT,
            user: None,
            password: None,
            recipient: None,
            timeout: SMTP_TIMEOUT,
        }
    }
}

/// Everything one run needs to know about its surroundings
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub mail: MailConfig,
    pub check: CheckConfig,
    pub watchlist_file: PathBuf,
    pub result_file: PathBuf,
    pub trigger_output: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            mail: MailConfig::default(),
            check: CheckConfig::default(),
            watchlist_file: PathBuf::from(DEFAULT_WATCHLIST_FILE),
            result_file: PathBuf::from(RESULT_FILE),
            trigger_output: None,
        }
    }
}

impl MonitorConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_source<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("SMTP_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                DomainWatchError::config(format!("SMTP_PORT must be a port number, got '{}'", raw))
            })?,
            None => DEFAULT_SMTP_PORT,
        };

        let mail = MailConfig {
            server: var("SMTP_SERVER").unwrap_or_else(|| DEFAULT_SMTP_SERVER.to_string()),
            port,
            user: var("SMTP_USER"),
            password: var("SMTP_PASSWORD"),
            recipient: var("NOTIFY_EMAIL"),
            timeout: SMTP_TIMEOUT,
        };

        let patterns = |key: &str| -> Vec<String> {
            var(key)
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default()
        };

        let check = CheckConfig {
            extra_available_patterns: patterns("WHOIS_AVAILABLE_PATTERNS"),
            extra_registered_patterns: patterns("WHOIS_REGISTERED_PATTERNS"),
            ..CheckConfig::default()
        };

        Ok(Self {
            mail,
            check,
            watchlist_file: var("WATCHLIST_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WATCHLIST_FILE)),
            result_file: PathBuf::from(RESULT_FILE),
            trigger_output: var(TRIGGER_OUTPUT_VAR).map(PathBuf::from),
        })
    }
}
