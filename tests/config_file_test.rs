// Integration test for configuration file support

use lumber::config::LoggerConfig;
use lumber::{Logger, LoggerError, Severity};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_toml_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumber.toml");
    let log_dir = temp_dir.path().join("logs");

    let toml_content = format!(
        r#"
        level = "info"
        file_prefix = "app"
        max_file_size_mb = 16
        directory = "{}"
    "#,
        log_dir.display()
    );
    fs::write(&config_path, toml_content).unwrap();

    let config = LoggerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.level, Severity::Info);
    assert_eq!(config.file_prefix, "app");
    assert_eq!(config.max_file_size_mb, 16);
    assert_eq!(config.directory, log_dir);
}

#[test]
fn test_load_json_config_with_numeric_level() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumber.json");

    let json_content = r#"{ "level": 3, "file_prefix": "svc", "max_file_size": 2 }"#;
    fs::write(&config_path, json_content).unwrap();

    let config = LoggerConfig::from_file(&config_path).unwrap();
    assert_eq!(config.level, Severity::Error);
    assert_eq!(config.file_prefix, "svc");
    assert_eq!(config.max_file_size_mb, 2);
}

#[test]
fn test_missing_fields_use_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumber.toml");
    fs::write(&config_path, "").unwrap();

    let config = LoggerConfig::from_file(&config_path).unwrap();
    assert_eq!(config, LoggerConfig::default());
}

#[test]
fn test_out_of_range_size_in_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumber.toml");
    fs::write(&config_path, "max_file_size_mb = 2000").unwrap();

    let result = LoggerConfig::from_file(&config_path);
    assert!(matches!(result, Err(LoggerError::InvalidMaxFileSize(2000))));
}

#[test]
fn test_invalid_level_in_file_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumber.json");
    fs::write(&config_path, r#"{ "level": "verbose" }"#).unwrap();

    let result = LoggerConfig::from_file(&config_path);
    assert!(matches!(result, Err(LoggerError::InvalidConfig(_))));
}

#[test]
fn test_malformed_toml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumber.toml");
    fs::write(&config_path, "level = [").unwrap();

    let result = LoggerConfig::from_file(&config_path);
    assert!(matches!(result, Err(LoggerError::InvalidConfig(_))));
}

#[test]
fn test_missing_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let result = LoggerConfig::from_file(&temp_dir.path().join("absent.toml"));
    assert!(matches!(result, Err(LoggerError::ConfigError(_))));
}

#[test]
fn test_logger_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lumber.json");
    let log_dir = temp_dir.path().join("out");

    let json_content = serde_json::json!({
        "level": "error",
        "file_prefix": "svc",
        "max_file_size_mb": 3,
        "directory": log_dir,
    });
    fs::write(&config_path, json_content.to_string()).unwrap();

    let config = LoggerConfig::from_file(&config_path).unwrap();
    let logger = Logger::with_config(&config).unwrap();

    assert_eq!(logger.level(), Severity::Error);
    assert_eq!(logger.max_file_size(), 3 << 20);
    assert_eq!(logger.file_prefix(), "svc");

    let name = logger
        .active_path()
        .unwrap()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert!(name.starts_with("svc-") && name.ends_with(".log"));
    assert!(logger.active_path().unwrap().starts_with(&log_dir));
}
