use crate::config::{validate_max_file_size, LoggerConfig};
use crate::error::{LoggerError, Result};
use crate::logs::file::ActiveFile;
use crate::logs::rotation::Rotator;
use crate::logs::writer::{FileSlot, LineWriter};
use crate::severity::Severity;
use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, RwLock};

/// Leveled logger appending to a size-rotated file
///
/// All methods take `&self`; share the logger across threads with `Arc<Logger>`.
/// Every write filters on the minimum severity, rotates if the active file
/// has grown past the threshold, then appends a single line.
#[derive(Debug)]
pub struct Logger {
    debug: LineWriter,
    info: LineWriter,
    error: LineWriter,
    rotator: Rotator,
    level: AtomicU8,
}

impl Logger {
    /// Create a logger with default settings in the current directory
    pub fn new() -> Result<Self> {
        Self::with_config(&LoggerConfig::default())
    }

    /// Create a logger from a configuration, opening today's log file
    ///
    /// # Returns
    /// * `Ok(Logger)` - The first log file is open for appending
    /// * `Err(LoggerError)` - Invalid configuration, or the file could not be created
    pub fn with_config(config: &LoggerConfig) -> Result<Self> {
        config.validate()?;

        std::fs::create_dir_all(&config.directory).map_err(|e| {
            LoggerError::LogFileError(format!("Failed to create log directory: {}", e))
        })?;

        let active = ActiveFile::open_for_today(&config.directory, &config.file_prefix)?;
        tracing::info!(
            path = %active.path().display(),
            level = %config.level,
            max_file_size_mb = config.max_file_size_mb,
            "Logger started"
        );

        let slot: FileSlot = Arc::new(RwLock::new(Some(active)));

        Ok(Self {
            debug: LineWriter::new(Severity::Debug, slot.clone()),
            info: LineWriter::new(Severity::Info, slot.clone()),
            error: LineWriter::new(Severity::Error, slot.clone()),
            rotator: Rotator::new(
                slot,
                config.directory.clone(),
                config.file_prefix.clone(),
                config.max_file_size_bytes(),
            ),
            level: AtomicU8::new(config.level.code()),
        })
    }

    /// Write `message` at `severity`
    ///
    /// Lines below the minimum severity are skipped without error.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: &str) -> Result<()> {
        if !severity.enabled_at(self.level()) {
            return Ok(());
        }

        self.rotator.check_and_rotate()?;
        self.writer(severity).emit(Location::caller(), message)
    }

    #[track_caller]
    pub fn debug(&self, message: &str) -> Result<()> {
        self.log(Severity::Debug, message)
    }

    #[track_caller]
    pub fn info(&self, message: &str) -> Result<()> {
        self.log(Severity::Info, message)
    }

    #[track_caller]
    pub fn error(&self, message: &str) -> Result<()> {
        self.log(Severity::Error, message)
    }

    /// Write pre-built format arguments at `severity`; see [`log_info!`](crate::log_info)
    #[track_caller]
    pub fn log_fmt(&self, severity: Severity, args: fmt::Arguments<'_>) -> Result<()> {
        // Skip formatting entirely for filtered lines
        if !severity.enabled_at(self.level()) {
            return Ok(());
        }

        match args.as_str() {
            Some(message) => self.log(severity, message),
            None => self.log(severity, &args.to_string()),
        }
    }

    #[track_caller]
    pub fn debug_fmt(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log_fmt(Severity::Debug, args)
    }

    #[track_caller]
    pub fn info_fmt(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log_fmt(Severity::Info, args)
    }

    #[track_caller]
    pub fn error_fmt(&self, args: fmt::Arguments<'_>) -> Result<()> {
        self.log_fmt(Severity::Error, args)
    }

    /// Line writer for a severity; all three share the active file
    pub fn writer(&self, severity: Severity) -> &LineWriter {
        match severity {
            Severity::Debug => &self.debug,
            Severity::Info => &self.info,
            Severity::Error => &self.error,
        }
    }

    /// Minimum severity written
    pub fn level(&self) -> Severity {
        Severity::from_code(self.level.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub fn set_level(&self, level: Severity) {
        self.level.store(level.code(), Ordering::Release);
        tracing::debug!(%level, "Log level changed");
    }

    /// Set the rotation threshold in megabytes (1 to 1024)
    ///
    /// Out-of-range values are rejected and the previous threshold is kept.
    pub fn set_max_file_size(&self, megabytes: u64) -> Result<()> {
        if let Err(e) = validate_max_file_size(megabytes) {
            tracing::warn!("Rejected max file size: {}", e);
            return Err(e);
        }

        self.rotator.set_max_size(megabytes << 20);
        tracing::info!(bytes = megabytes << 20, "Max file size changed");
        Ok(())
    }

    /// Rotation threshold in bytes
    pub fn max_file_size(&self) -> u64 {
        self.rotator.max_size()
    }

    /// Number of files rotated out so far
    pub fn rotations(&self) -> u64 {
        self.rotator.sequence()
    }

    pub fn directory(&self) -> &Path {
        self.rotator.directory()
    }

    pub fn file_prefix(&self) -> &str {
        self.rotator.prefix()
    }

    /// Path of the file currently receiving lines
    pub fn active_path(&self) -> Result<PathBuf> {
        let slot = self
            .rotator
            .slot()
            .read()
            .map_err(|_| LoggerError::LogError("Log file slot poisoned".to_string()))?;

        slot.as_ref()
            .map(|active| active.path().to_path_buf())
            .ok_or(LoggerError::Closed)
    }

    /// Flush and release the active file; later writes fail with [`LoggerError::Closed`]
    pub fn close(&self) -> Result<()> {
        let active = self
            .rotator
            .slot()
            .write()
            .map_err(|_| LoggerError::LogError("Log file slot poisoned".to_string()))?
            .take()
            .ok_or(LoggerError::Closed)?;

        let path = active.path().to_path_buf();
        active.close()?;
        tracing::info!(path = %path.display(), "Logger closed");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn set_max_file_size_bytes(&self, bytes: u64) {
        self.rotator.set_max_size(bytes);
    }
}
