//! Watchlist file loading

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{DomainWatchError, Result};

/// Parse watchlist text: one domain per line, `#` starts a comment line.
///
/// Lines are trimmed and lowercased, order is kept and duplicates are not removed.
pub fn parse_watchlist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

/// Load the watchlist from disk. A missing file is reported distinctly.
pub fn load_watchlist(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DomainWatchError::watchlist_missing(path),
        _ => DomainWatchError::io(e.to_string(), Some(path)),
    })?;

    let domains = parse_watchlist(&content);
    tracing::debug!(path = %path.display(), count = domains.len(), "Watchlist loaded");
    Ok(domains)
}
