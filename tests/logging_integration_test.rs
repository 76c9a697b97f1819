//! Integration tests for logging setup
//!
//! A global subscriber can only be installed once per process, so a single
//! test owns `init_logging`.

use fieldservice::config::LoggingConfig;
use fieldservice::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_defaults() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert!(!config.local_path.is_empty());
}

#[test]
fn test_init_logging_with_file_writer() {
    let dir = TempDir::new().unwrap();
    let log_dir = dir.path().join("logs");
    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_dir.display().to_string(),
        local_rotation: "never".to_string(),
    };

    assert!(init_logging("verbose", &config).is_err());

    let guard = init_logging("debug", &config).unwrap();
    assert!(guard.has_file_writer());
    assert!(log_dir.is_dir());

    tracing::info!(test = "logging", "written to file");

    // Second install fails: the global subscriber is already set
    assert!(init_logging("info", &LoggingConfig::default()).is_err());
    drop(guard);
}
