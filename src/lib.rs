//! Domain Watch - watchlist-driven domain availability monitoring
//!
//! Checks every domain of a watchlist over WHOIS, emails the operator when
//! any of them can be registered and leaves the result for scheduled jobs.

pub mod config;
pub mod domain;
pub mod error;
pub mod monitor;
pub mod notify;
pub mod report;
pub mod types;
pub mod whois;

// Re-export commonly used types
pub use config::{MailConfig, MonitorConfig};
pub use error::{DomainWatchError, Result};
pub use types::{Availability, CheckConfig, CheckStatus, LookupResult};

// Re-export main functionality
pub use domain::DomainChecker;
pub use monitor::{Monitor, RunSummary};
pub use notify::{Notifier, NotifyOutcome};
pub use report::ResultWriter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
