//! Domain availability checker

use chrono::Local;
use std::time::Instant;
use tokio::time::timeout;

use crate::error::DomainWatchError;
use crate::types::{CheckConfig, CheckStatus, LookupResult};
use crate::whois::{whois_server_for, KeywordClassifier, ResponseClassifier, WhoisCommand, WhoisLookup};

/// Checks one domain at a time against its registry's WHOIS server
pub struct DomainChecker {
    config: CheckConfig,
    lookup: Box<dyn WhoisLookup>,
    classifier: Box<dyn ResponseClassifier>,
}

impl DomainChecker {
    /// Create a new domain checker with default configuration
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a checker backed by the system `whois` program
    pub fn with_config(config: CheckConfig) -> Self {
        let lookup = WhoisCommand::new(config.whois_program.clone());
        Self::with_lookup(config, lookup)
    }

    /// Create a checker with a custom lookup backend
    pub fn with_lookup(config: CheckConfig, lookup: impl WhoisLookup + 'static) -> Self {
        let classifier = KeywordClassifier::from_config(&config);
        Self {
            config,
            lookup: Box::new(lookup),
            classifier: Box::new(classifier),
        }
    }

    /// Replace the response classifier
    pub fn with_classifier(mut self, classifier: impl ResponseClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    /// Check a single domain. Never fails: problems become a status.
    pub async fn check_domain(&self, domain: &str) -> LookupResult {
        let start_time = Instant::now();

        let server = match whois_server_for(domain) {
            Ok(server) => server,
            Err(e) => {
                tracing::debug!(domain = %domain, error = %e, "Domain rejected before lookup");
                return self.finish(domain, None, CheckStatus::Errored(e.to_string()), start_time);
            }
        };

        let response = match timeout(self.config.timeout, self.lookup.query(&server, domain)).await {
            Ok(response) => response,
            Err(_) => Err(DomainWatchError::timeout("WHOIS lookup", self.config.timeout.as_secs())),
        };

        let status = match response {
            Ok(text) => CheckStatus::Classified(self.classifier.classify(&text)),
            Err(e @ DomainWatchError::Timeout { .. }) => {
                tracing::debug!(domain = %domain, server = %server, error = %e, "WHOIS lookup timed out");
                CheckStatus::TimedOut
            }
            Err(e) => {
                tracing::debug!(domain = %domain, server = %server, error = %e, "WHOIS lookup failed");
                CheckStatus::Errored(e.to_string())
            }
        };

        self.finish(domain, Some(server), status, start_time)
    }

    fn finish(
        &self,
        domain: &str,
        server: Option<String>,
        status: CheckStatus,
        start_time: Instant,
    ) -> LookupResult {
        let duration = start_time.elapsed();
        tracing::debug!(
            domain = %domain,
            status = ?status,
            duration_ms = %duration.as_millis(),
            "Domain check completed"
        );

        LookupResult {
            domain: domain.to_string(),
            status,
            server,
            checked_at: Local::now(),
            check_duration: duration,
        }
    }

    /// Get checker configuration
    pub fn config(&self) -> &CheckConfig {
        &self.config
    }
}

impl Default for DomainChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Availability;
    use crate::whois::CannedLookup;
    use std::time::Duration;

    fn checker(lookup: CannedLookup) -> DomainChecker {
        DomainChecker::with_lookup(CheckConfig::default(), lookup)
    }

    #[test]
    fn test_default_timeout() {
        let checker = DomainChecker::new();
        assert_eq!(checker.config().timeout, Duration::from_secs(30));
        assert_eq!(checker.config().whois_program, "whois");
    }

    #[tokio::test]
    async fn test_available_domain() {
        let checker = checker(CannedLookup::new().with_text("foo.xyz", "The queried object does not exist: DOMAIN NOT FOUND"));
        let result = checker.check_domain("foo.xyz").await;
        assert!(result.is_available());
        assert_eq!(result.server.as_deref(), Some("whois.nic.xyz"));
        assert_eq!(result.message(), "域名可注册");
    }

    #[tokio::test]
    async fn test_registered_domain() {
        let checker = checker(CannedLookup::new().with_text("google.com", "Domain Name: GOOGLE.COM\nRegistrar: MarkMonitor Inc."));
        let result = checker.check_domain("google.com").await;
        assert_eq!(result.status, CheckStatus::Classified(Availability::Registered));
    }

    #[tokio::test]
    async fn test_indeterminate_domain() {
        let checker = checker(CannedLookup::new().with_text("busy.io", "Too many requests"));
        let result = checker.check_domain("busy.io").await;
        assert_eq!(result.status, CheckStatus::Classified(Availability::Indeterminate));
        assert!(!result.is_available());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_errored() {
        let checker = checker(CannedLookup::new().with_failure("down.org", "connection refused"));
        let result = checker.check_domain("down.org").await;
        match result.status {
            CheckStatus::Errored(reason) => assert!(reason.contains("connection refused")),
            other => panic!("unexpected status {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_slow_lookup_times_out() {
        let config = CheckConfig {
            timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let lookup = CannedLookup::new().with_hang("slow.com", Duration::from_secs(5));
        let checker = DomainChecker::with_lookup(config, lookup);

        let result = checker.check_domain("slow.com").await;
        assert_eq!(result.status, CheckStatus::TimedOut);
        assert!(result.check_duration < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_single_label_is_errored_without_lookup() {
        let checker = checker(CannedLookup::new().with_text("localhost", "DOMAIN NOT FOUND"));
        let result = checker.check_domain("localhost").await;
        assert!(matches!(result.status, CheckStatus::Errored(_)));
        assert!(result.server.is_none());
    }

    #[tokio::test]
    async fn test_configured_patterns_reach_classifier() {
        let config = CheckConfig {
            extra_available_patterns: vec!["status: libre".to_string()],
            ..Default::default()
        };
        let lookup = CannedLookup::new().with_text("ejemplo.es", "Status: LIBRE");
        let result = DomainChecker::with_lookup(config, lookup).check_domain("ejemplo.es").await;
        assert!(result.is_available());
    }

    #[tokio::test]
    async fn test_custom_classifier() {
        struct AlwaysRegistered;
        impl ResponseClassifier for AlwaysRegistered {
            fn classify(&self, _response: &str) -> Availability {
                Availability::Registered
            }
        }

        let checker = checker(CannedLookup::new().with_text("foo.xyz", "NOT FOUND"))
            .with_classifier(AlwaysRegistered);
        let result = checker.check_domain("foo.xyz").await;
        assert_eq!(result.status, CheckStatus::Classified(Availability::Registered));
    }
}
