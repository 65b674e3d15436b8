use crate::error::{LoggerError, Result};
use crate::logs::file::LOG_EXTENSION;
use crate::logs::writer::TIMESTAMP_FORMAT;
use crate::severity::Severity;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};

/// Whether a file is still receiving lines or has been rotated out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogFileKind {
    Rotated(u64),
    Active,
}

/// A log file found on disk
#[derive(Debug, Clone)]
pub struct LogFileInfo {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub kind: LogFileKind,
    pub size: u64,
}

impl LogFileInfo {
    /// Recognize `<prefix>-<YYYY-MM-DD>.log` and `<prefix>-<YYYY-MM-DD>.<N>.log`
    fn parse(path: PathBuf, prefix: &str, size: u64) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let rest = name.strip_prefix(prefix)?.strip_prefix('-')?;
        let stem = rest.strip_suffix(LOG_EXTENSION)?.strip_suffix('.')?;

        let (date_part, kind) = match stem.split_once('.') {
            Some((date, sequence)) => (date, LogFileKind::Rotated(sequence.parse().ok()?)),
            None => (stem, LogFileKind::Active),
        };
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;

        Some(Self {
            path,
            date,
            kind,
            size,
        })
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// One parsed log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub severity: Severity,
    pub timestamp: NaiveDateTime,
    /// `<file>:<line>` of the call site
    pub location: String,
    pub message: String,
}

impl LogEntry {
    /// Parse a line of the form `<PREFIX>: <timestamp> <file>:<line>: <message>`
    pub fn parse(line: &str) -> Option<Self> {
        let (prefix, rest) = line.split_once(": ")?;
        let severity = prefix.parse().ok()?;

        // Timestamp is fixed width: "YYYY/MM/DD HH:MM:SS.ffffff"
        let (timestamp, rest) = (rest.get(..26)?, rest.get(26..)?);
        let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;

        let rest = rest.strip_prefix(' ')?;
        let (location, message) = rest.split_once(": ")?;

        Some(Self {
            severity,
            timestamp,
            location: location.to_string(),
            message: message.to_string(),
        })
    }
}

/// List the log files for `prefix` in `dir`, oldest first
///
/// Files of one date are ordered by rotation sequence with the active file last.
pub fn list_log_files(dir: &Path, prefix: &str) -> Result<Vec<LogFileInfo>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        LoggerError::LogError(format!("Failed to read log directory {}: {}", dir.display(), e))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        if let Some(info) = LogFileInfo::parse(entry.path(), prefix, metadata.len()) {
            files.push(info);
        }
    }

    files.sort_by(|a, b| a.date.cmp(&b.date).then(a.kind.cmp(&b.kind)));
    Ok(files)
}

/// Read and parse every entry of one log file
///
/// A line without a `<PREFIX>: <timestamp> ` header continues the message of
/// the entry before it. A headerless first line, or a final line missing its
/// newline, means a torn write and fails the read.
pub fn read_entries(path: &Path) -> Result<Vec<LogEntry>> {
    let content = fs::read_to_string(path).map_err(|e| {
        LoggerError::LogFileError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let malformed = |index: usize, line: &str| {
        LoggerError::LogError(format!(
            "Malformed line {} in {}: {}",
            index + 1,
            path.display(),
            line
        ))
    };

    let mut entries: Vec<LogEntry> = Vec::new();
    for (index, raw) in content.split_inclusive('\n').enumerate() {
        let line = match raw.strip_suffix('\n') {
            Some(line) => line,
            None => return Err(malformed(index, raw)),
        };

        match LogEntry::parse(line) {
            Some(entry) => entries.push(entry),
            None => match entries.last_mut() {
                Some(previous) => {
                    previous.message.push('\n');
                    previous.message.push_str(line);
                }
                None => return Err(malformed(index, line)),
            },
        }
    }

    Ok(entries)
}

/// Read every entry from all log files for `prefix`, in file order
pub fn read_all_entries(dir: &Path, prefix: &str) -> Result<Vec<LogEntry>> {
    let mut entries = Vec::new();
    for file in list_log_files(dir, prefix)? {
        entries.extend(read_entries(&file.path)?);
    }
    Ok(entries)
}

/// Last `lines` entries across all files, optionally keeping only `min` and above
pub fn read_last_entries(
    dir: &Path,
    prefix: &str,
    lines: usize,
    min: Option<Severity>,
) -> Result<Vec<LogEntry>> {
    let mut entries = read_all_entries(dir, prefix)?;
    if let Some(min) = min {
        entries.retain(|e| e.severity.enabled_at(min));
    }

    let start = entries.len().saturating_sub(lines);
    Ok(entries.split_off(start))
}
