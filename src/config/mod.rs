use crate::error::{LoggerError, Result};
use crate::severity::Severity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Smallest accepted rotation threshold, in megabytes
pub const MIN_FILE_SIZE_MB: u64 = 1;

/// Largest accepted rotation threshold, in megabytes (1 GiB)
pub const MAX_FILE_SIZE_MB: u64 = 1024;

/// Logger configuration as consumed from a TOML or JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Minimum severity written to the file
    #[serde(default)]
    pub level: Severity,

    /// Stem prefix of every log file name (`<prefix>-<date>.log`)
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation threshold in megabytes
    #[serde(default = "default_max_file_size_mb", alias = "max_file_size")]
    pub max_file_size_mb: u64,

    /// Directory the log files are created in
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

// Default value functions for serde
fn default_file_prefix() -> String {
    "log".to_string()
}

fn default_max_file_size_mb() -> u64 {
    100
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Severity::default(),
            file_prefix: default_file_prefix(),
            max_file_size_mb: default_max_file_size_mb(),
            directory: default_directory(),
        }
    }
}

/// Check a megabyte threshold against the accepted range
pub fn validate_max_file_size(megabytes: u64) -> Result<()> {
    if !(MIN_FILE_SIZE_MB..=MAX_FILE_SIZE_MB).contains(&megabytes) {
        return Err(LoggerError::InvalidMaxFileSize(megabytes));
    }
    Ok(())
}

impl LoggerConfig {
    /// Build a config that writes into `directory` with every other field defaulted
    pub fn in_directory<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Load a logger configuration from a file (supports TOML and JSON)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LoggerError::ConfigError(format!("Failed to read config file: {}", e)))?;

        // Determine format based on file extension
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let config = match extension {
            "toml" => Self::parse_toml(&contents)?,
            "json" => Self::parse_json(&contents)?,
            _ => {
                return Err(LoggerError::InvalidConfig(format!(
                    "Unsupported file format: {}. Use .toml or .json",
                    extension
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    fn parse_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| LoggerError::InvalidConfig(format!("Failed to parse TOML: {}", e)))
    }

    fn parse_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| LoggerError::InvalidConfig(format!("Failed to parse JSON: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.file_prefix.is_empty() {
            return Err(LoggerError::ConfigError(
                "file_prefix must not be empty".to_string(),
            ));
        }

        if self.file_prefix.contains(['/', '\\']) {
            return Err(LoggerError::ConfigError(format!(
                "file_prefix must not contain path separators: {}",
                self.file_prefix
            )));
        }

        validate_max_file_size(self.max_file_size_mb)?;

        if self.directory.exists() && !self.directory.is_dir() {
            return Err(LoggerError::ConfigError(format!(
                "Log directory is not a directory: {}",
                self.directory.display()
            )));
        }

        Ok(())
    }

    /// Rotation threshold in bytes
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb << 20
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_logger_config_defaults() {
        let config = LoggerConfig::default();

        assert_eq!(config.level, Severity::Debug);
        assert_eq!(config.file_prefix, "log");
        assert_eq!(config.max_file_size_mb, 100);
        assert_eq!(config.max_file_size_bytes(), 100 * 1024 * 1024);
        assert_eq!(config.directory, PathBuf::from("."));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_size_range() {
        assert!(validate_max_file_size(1).is_ok());
        assert!(validate_max_file_size(1024).is_ok());
        assert!(matches!(
            validate_max_file_size(0),
            Err(LoggerError::InvalidMaxFileSize(0))
        ));
        assert!(matches!(
            validate_max_file_size(2000),
            Err(LoggerError::InvalidMaxFileSize(2000))
        ));
    }

    #[test]
    fn test_validate_empty_prefix() {
        let config = LoggerConfig {
            file_prefix: String::new(),
            ..LoggerConfig::default()
        };

        assert!(matches!(config.validate(), Err(LoggerError::ConfigError(_))));
    }

    #[test]
    fn test_validate_prefix_with_separator() {
        let config = LoggerConfig {
            file_prefix: "../escape".to_string(),
            ..LoggerConfig::default()
        };

        assert!(matches!(config.validate(), Err(LoggerError::ConfigError(_))));
    }

    #[test]
    fn test_validate_directory_is_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("not-a-dir");
        fs::write(&file_path, "x").unwrap();

        let config = LoggerConfig::in_directory(&file_path);
        assert!(matches!(config.validate(), Err(LoggerError::ConfigError(_))));
    }

    #[test]
    fn test_missing_directory_is_allowed() {
        let temp_dir = TempDir::new().unwrap();
        let config = LoggerConfig::in_directory(temp_dir.path().join("later"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_json_with_original_keys() {
        let json = r#"{ "level": 2, "file_prefix": "app", "max_file_size": 5 }"#;
        let config = LoggerConfig::parse_json(json).unwrap();

        assert_eq!(config.level, Severity::Info);
        assert_eq!(config.file_prefix, "app");
        assert_eq!(config.max_file_size_mb, 5);
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "level: debug").unwrap();

        assert!(matches!(
            LoggerConfig::from_file(&path),
            Err(LoggerError::InvalidConfig(_))
        ));
    }
}
