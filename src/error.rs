//! Error handling for domain-watch

use std::path::Path;

use thiserror::Error;

/// Main error type for domain-watch
#[derive(Error, Debug, Clone)]
pub enum DomainWatchError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Watchlist file not found: {path}")]
    WatchlistMissing { path: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Lookup error for '{domain}': {message}")]
    Lookup { domain: String, message: String },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Mail error: {message}")]
    Mail { message: String },
}

impl DomainWatchError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a missing-watchlist error
    pub fn watchlist_missing(path: &Path) -> Self {
        Self::WatchlistMissing {
            path: path.display().to_string(),
        }
    }

    /// Create an IO error bound to a path
    pub fn io(message: impl Into<String>, path: Option<&Path>) -> Self {
        Self::Io {
            message: message.into(),
            path: path.map(|p| p.display().to_string()),
        }
    }

    /// Create a lookup error
    pub fn lookup(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Attach the file an IO error refers to
    pub fn at(self, location: &Path) -> Self {
        match self {
            Self::Io { message, .. } => Self::Io {
                message,
                path: Some(location.display().to_string()),
            },
            other => other,
        }
    }

    /// Create a mail error
    pub fn mail(message: impl Into<String>) -> Self {
        Self::Mail {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or environment variables", message)
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Each watchlist line must be a full domain such as example.com", message)
            }
            Self::WatchlistMissing { path } => {
                format!("❌ Watchlist file not found: {}\n💡 Create it or point WATCHLIST_FILE at an existing file", path)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Lookup { domain, message } => {
                format!("⚠️  Could not look up '{}': {}", domain, message)
            }
            Self::Timeout { operation, timeout_secs } => {
                format!("⏱️  Operation '{}' timed out after {}s", operation, timeout_secs)
            }
            Self::Mail { message } => {
                format!("❌ Failed to send email: {}\n💡 Check SMTP_SERVER, SMTP_PORT and credentials", message)
            }
        }
    }
}

/// Convert from common error types
impl From<std::io::Error> for DomainWatchError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// Every bounded operation in the crate defaults to 30 seconds
impl From<tokio::time::error::Elapsed> for DomainWatchError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::timeout("Operation", 30)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainWatchError>;
