//! Domain Watch - checks a watchlist of domains and emails when one frees up.
//!
//! Meant to be triggered by cron or a scheduled CI job; each invocation is a
//! single, self-contained run.

use anyhow::Context;
use domain_watch::{DomainWatchError, Monitor, MonitorConfig};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize the library
    if let Err(e) = domain_watch::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("domain_watch=warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return;
    }

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-V") {
        println!("domain-watch {}", domain_watch::VERSION);
        return;
    }

    if let Some(unknown) = args.get(1).filter(|a| a.starts_with('-')) {
        eprintln!("❌ Unknown option: {}", unknown);
        eprintln!();
        print_help();
        process::exit(2);
    }

    let watchlist = args.get(1).map(PathBuf::from);

    if let Err(e) = run(watchlist).await {
        match e.downcast_ref::<DomainWatchError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

async fn run(watchlist: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = MonitorConfig::from_env().context("failed to read configuration")?;
    if let Some(path) = watchlist {
        config.watchlist_file = path;
    }

    Monitor::new(config).run().await?;
    Ok(())
}

/// Print help information
fn print_help() {
    println!("🔍 Domain Watch - domain availability monitor");
    println!("═══════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    domain-watch [WATCHLIST]");
    println!();
    println!("ARGS:");
    println!("    WATCHLIST          Watchlist file, overrides WATCHLIST_FILE");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    WATCHLIST_FILE     Watchlist path (default: watchlist.txt)");
    println!("    SMTP_SERVER        SMTP relay (default: smtp.gmail.com)");
    println!("    SMTP_PORT          SMTP port, STARTTLS (default: 587)");
    println!("    SMTP_USER          Sender account");
    println!("    SMTP_PASSWORD      Sender password or app password");
    println!("    NOTIFY_EMAIL       Recipient of the notification");
    println!("    GITHUB_OUTPUT      Scheduled-job output file (optional)");
    println!("    WHOIS_AVAILABLE_PATTERNS   Extra comma-separated \"not found\" phrases");
    println!("    WHOIS_REGISTERED_PATTERNS  Extra comma-separated registration markers");
    println!("    RUST_LOG           Log filter (default: domain_watch=warn)");
    println!();
    println!("OUTPUT:");
    println!("    available_domains.txt is rewritten whenever a domain is available.");
    println!("    Requires the `whois` command-line client on PATH.");
}
