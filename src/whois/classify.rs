//! Classification of raw WHOIS text.
//!
//! Registries answer in free text, so the status is inferred from keywords.
//! [`ResponseClassifier`] is the seam for smarter, per-registry parsers.

use crate::types::{Availability, CheckConfig};

/// Turns a WHOIS response into an availability verdict
pub trait ResponseClassifier: Send + Sync {
    fn classify(&self, response: &str) -> Availability;
}

/// Phrases registries use when a domain has no registration
pub const NOT_FOUND_PATTERNS: &[&str] = &[
    "domain not found",
    "no match",
    "not found",
    "no data found",
    "no entries found",
    "status: free",
    "status: available",
    "object does not exist",
];

/// Fields only present in the record of a registered domain
pub const REGISTERED_PATTERNS: &[&str] = &["domain name:", "registrar:"];

/// Case-insensitive substring matching over two phrase sets.
///
/// "Not found" phrases are checked first and win over registration fields.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    available_patterns: Vec<String>,
    registered_patterns: Vec<String>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self {
            available_patterns: NOT_FOUND_PATTERNS.iter().map(|s| s.to_string()).collect(),
            registered_patterns: REGISTERED_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add an extra "not found" phrase
    pub fn with_available_pattern(mut self, pattern: &str) -> Self {
        self.available_patterns.push(pattern.to_lowercase());
        self
    }

    /// Add an extra registration marker
    pub fn with_registered_pattern(mut self, pattern: &str) -> Self {
        self.registered_patterns.push(pattern.to_lowercase());
        self
    }

    /// Built-in phrases extended with user-supplied ones
    pub fn from_config(config: &CheckConfig) -> Self {
        let classifier = config
            .extra_available_patterns
            .iter()
            .fold(Self::new(), |c, p| c.with_available_pattern(p));
        config
            .extra_registered_patterns
            .iter()
            .fold(classifier, |c, p| c.with_registered_pattern(p))
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseClassifier for KeywordClassifier {
    fn classify(&self, response: &str) -> Availability {
        let output_lower = response.to_lowercase();

        if self.available_patterns.iter().any(|p| output_lower.contains(p.as_str())) {
            Availability::Available
        } else if self.registered_patterns.iter().any(|p| output_lower.contains(p.as_str())) {
            Availability::Registered
        } else {
            Availability::Indeterminate
        }
    }
}
