//! Core types and structures for domain-watch

use chrono::{DateTime, Local};
use std::time::Duration;

/// Timestamp layout used in console output, emails and the result file
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a local timestamp the way every operator-facing output shows it
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Outcome of classifying a lookup response text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Registered,
    Indeterminate,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Availability::Available => write!(f, "available"),
            Availability::Registered => write!(f, "registered"),
            Availability::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// Final status of a single domain check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// The lookup answered and its text was classified
    Classified(Availability),
    /// The lookup did not answer within the configured bound
    TimedOut,
    /// The lookup could not be performed at all
    Errored(String),
}

impl CheckStatus {
    /// Human-readable message shown next to the domain in progress output
    pub fn message(&self) -> String {
        match self {
            CheckStatus::Classified(Availability::Available) => "域名可注册".to_string(),
            CheckStatus::Classified(Availability::Registered) => "域名已注册".to_string(),
            CheckStatus::Classified(Availability::Indeterminate) => "无法确定状态".to_string(),
            CheckStatus::TimedOut => "查询超时".to_string(),
            CheckStatus::Errored(reason) => format!("查询出错: {}", reason),
        }
    }
}

/// Result of checking one domain
#[derive(Debug, Clone)]
pub struct LookupResult {
    pub domain: String,
    pub status: CheckStatus,
    pub server: Option<String>,
    pub checked_at: DateTime<Local>,
    pub check_duration: Duration,
}

impl LookupResult {
    /// Only a positive classification counts; timeouts and errors do not
    pub fn is_available(&self) -> bool {
        self.status == CheckStatus::Classified(Availability::Available)
    }

    pub fn message(&self) -> String {
        self.status.message()
    }
}

/// Configuration for domain checking
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Upper bound for one external lookup
    pub timeout: Duration,
    /// Program invoked as `<program> -h <server> <domain>`
    pub whois_program: String,
    /// Additional "not found" phrases on top of the built-in set
    pub extra_available_patterns: Vec<String>,
    /// Additional registration markers on top of the built-in set
    pub extra_registered_patterns: Vec<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            whois_program: "whois".to_string(),
            extra_available_patterns: Vec::new(),
            extra_registered_patterns: Vec::new(),
        }
    }
}
