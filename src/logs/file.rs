use crate::error::{LoggerError, Result};
use chrono::{Local, NaiveDate};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Extension shared by active and rotated log files
pub const LOG_EXTENSION: &str = "log";

/// Name of the active file for `prefix` created on `date`: `<prefix>-<YYYY-MM-DD>.log`
pub fn active_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}-{}.{}", prefix, date.format("%Y-%m-%d"), LOG_EXTENSION)
}

/// Path a rotated-out file is renamed to: `<stem>.<sequence>.log` beside the original
pub fn rotated_path(active: &Path, sequence: u64) -> Result<PathBuf> {
    let parent = active.parent().ok_or_else(|| {
        LoggerError::LogRotationError("Invalid log file path".to_string())
    })?;

    let file_stem = active.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
        LoggerError::LogRotationError("Invalid log file name".to_string())
    })?;

    Ok(parent.join(format!("{}.{}.{}", file_stem, sequence, LOG_EXTENSION)))
}

/// The file currently receiving appended lines
///
/// The handle sits behind its own mutex so one line is appended at a time,
/// while the byte count is readable without taking it.
#[derive(Debug)]
pub struct ActiveFile {
    path: PathBuf,
    file: Mutex<File>,
    size: AtomicU64,
}

impl ActiveFile {
    /// Create (or append to) today's log file for `prefix` in `dir`
    pub fn open_for_today(dir: &Path, prefix: &str) -> Result<Self> {
        let name = active_file_name(prefix, Local::now().date_naive());
        Self::open(dir.join(name))
    }

    /// Open `path` in append mode, picking up its current length
    pub fn open(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::LogFileError(format!("{}: {}", path.display(), e))
            })?;

        let size = file
            .metadata()
            .map(|m| m.len())
            .map_err(|e| {
                LoggerError::LogFileError(format!("Failed to stat {}: {}", path.display(), e))
            })?;

        tracing::debug!(path = %path.display(), size, "Opened log file");

        Ok(Self {
            path,
            file: Mutex::new(file),
            size: AtomicU64::new(size),
        })
    }

    /// Path of the file on disk
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes currently in the file
    pub fn size(&self) -> u64 {
        self.size.load(Ordering::Acquire)
    }

    /// Append one complete line; the whole buffer lands before any other append starts
    pub fn append(&self, line: &[u8]) -> Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| LoggerError::LogError("Log file lock poisoned".to_string()))?;

        file.write_all(line)
            .map_err(|e| LoggerError::LogError(format!("Failed to write to log: {}", e)))?;

        self.size.fetch_add(line.len() as u64, Ordering::AcqRel);
        Ok(())
    }

    /// Flush and sync the file, consuming the handle
    pub fn close(self) -> Result<()> {
        let mut file = self
            .file
            .into_inner()
            .map_err(|_| LoggerError::LogError("Log file lock poisoned".to_string()))?;

        file.flush()
            .map_err(|e| LoggerError::LogError(format!("Failed to flush log: {}", e)))?;
        file.sync_all()
            .map_err(|e| LoggerError::LogError(format!("Failed to sync log: {}", e)))?;

        Ok(())
    }
}
