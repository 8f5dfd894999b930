//! Integration tests for domain-watch

use domain_watch::{
    notify::RecordingMailer,
    whois::CannedLookup,
    CheckConfig, DomainChecker, DomainWatchError, MailConfig, Monitor, MonitorConfig, Notifier,
    NotifyOutcome,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NOT_FOUND: &str = "The queried object does not exist: DOMAIN NOT FOUND";
const REGISTERED: &str = "Domain Name: TAKEN.COM\nRegistrar: Example Registrar, Inc.";

fn complete_mail() -> MailConfig {
    MailConfig {
        user: Some("bot@example.org".to_string()),
        password: Some("secret".to_string()),
        recipient: Some("me@example.org".to_string()),
        ..Default::default()
    }
}

fn config_in(dir: &Path, watchlist: &str, mail: MailConfig) -> MonitorConfig {
    let watchlist_file = dir.join("watchlist.txt");
    fs::write(&watchlist_file, watchlist).unwrap();
    MonitorConfig {
        mail,
        check: CheckConfig::default(),
        watchlist_file,
        result_file: dir.join("available_domains.txt"),
        trigger_output: Some(dir.join("github_output")),
    }
}

fn monitor(config: MonitorConfig, lookup: CannedLookup, mailer: RecordingMailer) -> Monitor {
    let checker = DomainChecker::with_lookup(CheckConfig::default(), lookup);
    let notifier = Notifier::with_mailer(config.mail.clone(), mailer);
    Monitor::with_parts(config, checker, notifier)
}

#[tokio::test]
async fn test_available_domains_are_notified_and_persisted() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), "foo.xyz\ntaken.com\n# skip.me\nbar.com\n", complete_mail());
    let lookup = CannedLookup::new()
        .with_text("foo.xyz", NOT_FOUND)
        .with_text("taken.com", REGISTERED)
        .with_text("bar.com", "No match for \"BAR.COM\".");
    let mailer = RecordingMailer::new();

    let summary = monitor(config, lookup, mailer.clone()).run().await.unwrap();

    assert_eq!(summary.checked, 3);
    assert_eq!(summary.available, vec!["foo.xyz", "bar.com"]);
    assert!(summary.email_sent());

    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].subject.contains('2'));
    assert!(sent[0].html_body.contains("foo.xyz"));
    assert!(sent[0].html_body.contains("bar.com"));
    assert!(!sent[0].html_body.contains("taken.com"));

    let result = fs::read_to_string(dir.path().join("available_domains.txt")).unwrap();
    let lines: Vec<&str> = result.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("# 检测时间: "));
    assert_eq!(&lines[1..], &["foo.xyz", "bar.com"]);

    let trigger = fs::read_to_string(dir.path().join("github_output")).unwrap();
    assert_eq!(trigger, "available=true\ncount=2\n");
}

#[tokio::test]
async fn test_nothing_available() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), "taken.com\nbusy.io\n", complete_mail());
    let lookup = CannedLookup::new()
        .with_text("taken.com", REGISTERED)
        .with_failure("busy.io", "connection reset by peer");
    let mailer = RecordingMailer::new();

    let summary = monitor(config, lookup, mailer.clone()).run().await.unwrap();

    assert_eq!(summary.checked, 2);
    assert!(summary.available.is_empty());
    assert!(summary.notification.is_none());
    assert!(mailer.sent().is_empty());
    assert!(!dir.path().join("available_domains.txt").exists());
    assert_eq!(
        fs::read_to_string(dir.path().join("github_output")).unwrap(),
        "available=false\n"
    );
}

#[tokio::test]
async fn test_incomplete_mail_config_still_writes_results() {
    let dir = TempDir::new().unwrap();
    let mail = MailConfig {
        recipient: None,
        ..complete_mail()
    };
    let config = config_in(dir.path(), "foo.xyz\n", mail);
    let mailer = RecordingMailer::new();

    let summary = monitor(config, CannedLookup::new().with_text("foo.xyz", NOT_FOUND), mailer.clone())
        .run()
        .await
        .unwrap();

    assert_eq!(
        summary.notification,
        Some(NotifyOutcome::Skipped {
            missing: vec!["NOTIFY_EMAIL"]
        })
    );
    assert!(mailer.sent().is_empty());
    let result = fs::read_to_string(dir.path().join("available_domains.txt")).unwrap();
    assert!(result.ends_with("foo.xyz\n"));
}

#[tokio::test]
async fn test_mail_failure_does_not_abort_run() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), "foo.xyz\n", complete_mail());

    let summary = monitor(
        config,
        CannedLookup::new().with_text("foo.xyz", NOT_FOUND),
        RecordingMailer::failing("connection refused"),
    )
    .run()
    .await
    .unwrap();

    assert!(!summary.email_sent());
    assert!(dir.path().join("available_domains.txt").exists());
}

#[tokio::test]
async fn test_empty_watchlist_ends_quietly() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path(), "# nothing yet\n\n", complete_mail());
    let mailer = RecordingMailer::new();

    let summary = monitor(config, CannedLookup::new(), mailer.clone()).run().await.unwrap();

    assert_eq!(summary.checked, 0);
    assert!(mailer.sent().is_empty());
    assert!(!dir.path().join("available_domains.txt").exists());
    assert!(!dir.path().join("github_output").exists());
}

#[tokio::test]
async fn test_missing_watchlist_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut config = config_in(dir.path(), "", complete_mail());
    config.watchlist_file = dir.path().join("does-not-exist.txt");

    let err = monitor(config, CannedLookup::new(), RecordingMailer::new())
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, DomainWatchError::WatchlistMissing { .. }));
}

#[test]
fn test_library_initialization() {
    assert!(domain_watch::init().is_ok());
}
