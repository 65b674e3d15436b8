use thiserror::Error;

/// Main error type for the lumber logging engine
#[derive(Debug, Error)]
pub enum LoggerError {
    // Configuration errors, recoverable and never mutate logger state
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid configuration file: {0}")]
    InvalidConfig(String),

    #[error("Invalid max file size: {0} MB (must be between 1 and 1024)")]
    InvalidMaxFileSize(u64),

    // Log file errors, fatal for the affected logger instance
    #[error("Log error: {0}")]
    LogError(String),

    #[error("Failed to open log file: {0}")]
    LogFileError(String),

    #[error("Log rotation failed: {0}")]
    LogRotationError(String),

    #[error("Logger is closed")]
    Closed,

    // IO errors (automatically converted from std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Whether the error is a rejected configuration value rather than an I/O failure
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            LoggerError::ConfigError(_)
                | LoggerError::InvalidConfig(_)
                | LoggerError::InvalidMaxFileSize(_)
        )
    }
}

/// Result type alias for lumber operations
pub type Result<T> = std::result::Result<T, LoggerError>;
