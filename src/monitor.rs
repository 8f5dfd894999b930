//! One monitoring run: load, check, notify, persist.

use chrono::Local;
use std::io::Write;

use crate::config::MonitorConfig;
use crate::domain::{load_watchlist, DomainChecker};
use crate::error::Result;
use crate::notify::{Notifier, NotifyOutcome};
use crate::report::ResultWriter;
use crate::types::format_timestamp;

const RULE: &str = "============================================================";
const SEPARATOR: &str = "------------------------------------------------------------";

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub checked: usize,
    pub available: Vec<String>,
    /// `None` when nothing was available and no email was attempted
    pub notification: Option<NotifyOutcome>,
}

impl RunSummary {
    pub fn email_sent(&self) -> bool {
        self.notification.as_ref().is_some_and(NotifyOutcome::is_sent)
    }
}

/// Sequences the components for a single run
pub struct Monitor {
    config: MonitorConfig,
    checker: DomainChecker,
    notifier: Notifier,
    writer: ResultWriter,
}

impl Monitor {
    /// Monitor wired to the system `whois` program and SMTP
    pub fn new(config: MonitorConfig) -> Self {
        let notifier = Notifier::new(config.mail.clone());
        let checker = DomainChecker::with_config(config.check.clone());
        Self::with_parts(config, checker, notifier)
    }

    pub fn with_parts(config: MonitorConfig, checker: DomainChecker, notifier: Notifier) -> Self {
        let writer = ResultWriter::new(config.result_file.clone(), config.trigger_output.clone());
        Self {
            config,
            checker,
            notifier,
            writer,
        }
    }

    /// Run once. Only watchlist and result-file I/O problems are errors.
    pub async fn run(&self) -> Result<RunSummary> {
        println!("{}", RULE);
        println!("🔍 Domain Watch");
        println!("Time: {}", format_timestamp(&Local::now()));
        println!("{}", RULE);

        let domains = load_watchlist(&self.config.watchlist_file)?;

        if domains.is_empty() {
            println!("⚠️  Watchlist is empty, nothing to monitor");
            return Ok(RunSummary {
                checked: 0,
                available: Vec::new(),
                notification: None,
            });
        }

        println!();
        println!("Monitoring {} domain(s):", domains.len());
        for domain in &domains {
            println!("  - {}", domain);
        }
        println!("{}", SEPARATOR);

        let mut available = Vec::new();
        for domain in &domains {
            print!("Checking: {} ... ", domain);
            let _ = std::io::stdout().flush();

            let result = self.checker.check_domain(domain).await;
            if result.is_available() {
                println!("✅ {}", result.message());
                available.push(domain.clone());
            } else {
                println!("❌ {}", result.message());
            }
        }

        println!("{}", SEPARATOR);

        let notification = if available.is_empty() {
            println!();
            println!("😔 No available domains found");
            None
        } else {
            println!();
            println!("🎉 Found {} available domain(s)!", available.len());
            for domain in &available {
                println!("  ✅ {}", domain);
            }

            let outcome = self.notifier.notify(&available).await;
            report_notification(&outcome);
            Some(outcome)
        };

        self.writer.write(&available, &Local::now())?;

        tracing::info!(
            checked = domains.len(),
            available = available.len(),
            email_sent = notification.as_ref().is_some_and(NotifyOutcome::is_sent),
            "Monitoring run completed"
        );

        Ok(RunSummary {
            checked: domains.len(),
            available,
            notification,
        })
    }
}

fn report_notification(outcome: &NotifyOutcome) {
    match outcome {
        NotifyOutcome::Sent { recipient } => println!("✅ Email sent to {}", recipient),
        NotifyOutcome::Skipped { missing } => {
            println!("⚠️  Mail configuration incomplete, email skipped");
            println!("   Please set: {}", missing.join(", "));
        }
        NotifyOutcome::Failed { reason } => println!("❌ Failed to send email: {}", reason),
    }
}
