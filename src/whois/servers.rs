//! Central WHOIS server registry.
//!
//! A small static mapping for high-usage TLDs. Anything else gets the
//! conventional `whois.nic.<tld>` guess, which is wrong for a fair number of
//! registries; callers treat a failed lookup as a normal outcome.

use crate::error::{DomainWatchError, Result};

/// Prefix used to synthesize a server name for unknown TLDs
pub const FALLBACK_PREFIX: &str = "whois.nic";

/// Get the known WHOIS server for a TLD (lowercase, without leading dot).
pub fn known_whois_server(tld: &str) -> Option<&'static str> {
    match tld {
        "xyz" => Some("whois.nic.xyz"),
        "com" | "net" => Some("whois.verisign-grs.com"),
        "org" => Some("whois.pir.org"),
        "io" => Some("whois.nic.io"),
        "co" => Some("whois.nic.co"),
        "me" => Some("whois.nic.me"),
        "info" => Some("whois.afilias.net"),
        "top" => Some("whois.nic.top"),
        "cn" => Some("whois.cnnic.cn"),
        _ => None,
    }
}

/// Extract the lowercase TLD of a domain.
///
/// Single-label names are rejected: there is no registry to ask about them.
pub fn tld_of(domain: &str) -> Result<String> {
    let domain = domain.trim();
    let (name, tld) = domain
        .rsplit_once('.')
        .ok_or_else(|| DomainWatchError::validation(format!("'{}' has no TLD", domain)))?;

    if name.is_empty() || tld.is_empty() {
        return Err(DomainWatchError::validation(format!(
            "'{}' is not a complete domain name",
            domain
        )));
    }

    Ok(tld.to_lowercase())
}

/// Resolve the WHOIS server responsible for a domain.
pub fn whois_server_for(domain: &str) -> Result<String> {
    let tld = tld_of(domain)?;
    Ok(known_whois_server(&tld)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{}.{}", FALLBACK_PREFIX, tld)))
}
