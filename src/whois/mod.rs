//! WHOIS plumbing: server resolution, lookup backends and response classification.

pub mod classify;
pub mod lookup;
pub mod servers;

pub use classify::{KeywordClassifier, ResponseClassifier};
pub use lookup::{CannedLookup, WhoisCommand, WhoisLookup};
pub use servers::whois_server_for;
