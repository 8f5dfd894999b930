//! Domain checking and watchlist handling

pub mod checker;
pub mod watchlist;

// Re-export main functionality
pub use checker::DomainChecker;
pub use watchlist::{load_watchlist, parse_watchlist};
