// Logs module - Leveled file logging with size-based rotation

mod file;
mod logger;
pub mod reader;
mod rotation;
mod writer;

pub use file::{active_file_name, rotated_path, ActiveFile, LOG_EXTENSION};
pub use logger::Logger;
pub use reader::{list_log_files, read_all_entries, LogEntry, LogFileInfo, LogFileKind};
pub use rotation::Rotator;
pub use writer::{format_line, FileSlot, LineWriter, TIMESTAMP_FORMAT};
