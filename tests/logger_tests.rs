//! Integration tests for logger behavior.

use degree_audit::shared::logger::{init_file_logging, set_level, set_level_from_str, Level};
use degree_audit::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("warn"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn level_ordering_follows_severity() {
    assert!(Level::Error < Level::Warn);
    assert!(Level::Info < Level::Debug);
    assert_eq!("WARN".parse::<Level>(), Ok(Level::Warn));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration");
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_creates_missing_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("audit.log");
    assert!(init_file_logging(&path));
    error!("file logging integration");
    assert!(path.exists());
}
