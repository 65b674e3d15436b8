use crate::error::{LoggerError, Result};
use crate::logs::file::ActiveFile;
use crate::severity::Severity;
use chrono::{DateTime, Local};
use std::panic::Location;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Timestamp layout of every line, fixed width
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

/// Slot holding the logger's one active file
///
/// Every [`LineWriter`] shares the same slot, so swapping its contents
/// repoints all of them at once. `None` means the logger is closed or failed.
pub type FileSlot = Arc<RwLock<Option<ActiveFile>>>;

/// Writes lines of a single severity into the shared active file
#[derive(Debug, Clone)]
pub struct LineWriter {
    severity: Severity,
    slot: FileSlot,
}

impl LineWriter {
    pub fn new(severity: Severity, slot: FileSlot) -> Self {
        Self { severity, slot }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Format one line and append it to whichever file the slot holds now
    pub fn emit(&self, location: &Location<'_>, message: &str) -> Result<()> {
        let line = format_line(self.severity, &Local::now(), location, message);

        let slot = self
            .slot
            .read()
            .map_err(|_| LoggerError::LogError("Log file slot poisoned".to_string()))?;
        let active = slot.as_ref().ok_or(LoggerError::Closed)?;

        active.append(line.as_bytes())
    }
}

/// Format a log line
///
/// Format: `<PREFIX>: <YYYY/MM/DD HH:MM:SS.ffffff> <file>:<line>: <message>\n`
pub fn format_line(
    severity: Severity,
    timestamp: &DateTime<Local>,
    location: &Location<'_>,
    message: &str,
) -> String {
    let file = Path::new(location.file())
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_else(|| location.file());

    format!(
        "{}: {} {}:{}: {}\n",
        severity.prefix(),
        timestamp.format(TIMESTAMP_FORMAT),
        file,
        location.line(),
        message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, 12, 30, 45).unwrap()
    }

    #[test]
    fn test_format_line() {
        let location = Location::caller();
        let line = format_line(Severity::Info, &fixed_time(), location, "hello");

        let expected = format!(
            "INFO: 2024/01/01 12:30:45.000000 writer.rs:{}: hello\n",
            location.line()
        );
        assert_eq!(line, expected);
    }

    #[test]
    fn test_format_empty_message() {
        let line = format_line(Severity::Error, &fixed_time(), Location::caller(), "");
        assert!(line.starts_with("ERROR: 2024/01/01 12:30:45.000000 writer.rs:"));
        assert!(line.ends_with(": \n"));
    }

    #[test]
    fn test_emit_appends_to_shared_file() {
        let temp_dir = TempDir::new().unwrap();
        let active = ActiveFile::open(temp_dir.path().join("shared.log")).unwrap();
        let slot: FileSlot = Arc::new(RwLock::new(Some(active)));

        let debug = LineWriter::new(Severity::Debug, slot.clone());
        let error = LineWriter::new(Severity::Error, slot.clone());

        debug.emit(Location::caller(), "first").unwrap();
        error.emit(Location::caller(), "second").unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join("shared.log")).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("DEBUG: ") && lines[0].ends_with(": first"));
        assert!(lines[1].starts_with("ERROR: ") && lines[1].ends_with(": second"));
    }

    #[test]
    fn test_emit_on_empty_slot_is_closed() {
        let slot: FileSlot = Arc::new(RwLock::new(None));
        let writer = LineWriter::new(Severity::Info, slot);

        assert!(matches!(
            writer.emit(Location::caller(), "lost"),
            Err(LoggerError::Closed)
        ));
    }
}
