// Output formatting and display for CLI

use crate::logs::{LogEntry, LogFileInfo, LogFileKind};
use crate::severity::Severity;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Confirm a single written line
pub fn print_written(level: Severity, path: &Path) {
    println!(
        "{} {} line written to {}",
        "✓".green(),
        format_severity(level),
        path.display().to_string().cyan()
    );
}

/// Report a line skipped because it is below the configured level
pub fn print_filtered(level: Severity, min: Severity) {
    println!(
        "{} {} line filtered out (level is {})",
        "-".yellow(),
        format_severity(level),
        min.to_string().bold()
    );
}

/// Table row for a log file
#[derive(Tabled)]
struct FileRow {
    #[tabled(rename = "File")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Size")]
    size: String,
}

/// Print log files as a table
pub fn print_files(files: &[LogFileInfo]) {
    if files.is_empty() {
        println!("{}", "No log files found".yellow());
        return;
    }

    let rows: Vec<FileRow> = files
        .iter()
        .map(|f| FileRow {
            name: f.name(),
            kind: match f.kind {
                LogFileKind::Active => "active".green().to_string(),
                LogFileKind::Rotated(n) => format!("rotated #{}", n),
            },
            size: format_size(f.size),
        })
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::last()).with(Alignment::right()));

    println!("{}", table);

    let total: u64 = files.iter().map(|f| f.size).sum();
    println!(
        "{} file(s), {} total",
        files.len().to_string().bold(),
        format_size(total).bold()
    );
}

/// Print parsed entries, coloring the severity prefix
pub fn print_entries(entries: &[LogEntry]) {
    if entries.is_empty() {
        println!("{}", "No log lines found".yellow());
        return;
    }

    for entry in entries {
        println!(
            "{} {} {} {}",
            format_severity(entry.severity),
            entry
                .timestamp
                .format("%Y-%m-%d %H:%M:%S%.3f")
                .to_string()
                .dimmed(),
            entry.location.bright_black(),
            entry.message
        );
    }
}

/// Summary printed after a fill run
pub fn print_fill_summary(lines: u64, rotations: u64, dir: &Path) {
    println!("  {}: {}", "Lines".bold(), lines);
    println!("  {}: {}", "Rotations".bold(), rotations);
    println!("  {}: {}", "Directory".bold(), dir.display().to_string().cyan());
}

/// Format a severity with color coding
fn format_severity(severity: Severity) -> String {
    let prefix = format!("{:<5}", severity.prefix());
    match severity {
        Severity::Debug => prefix.bright_black().to_string(),
        Severity::Info => prefix.green().to_string(),
        Severity::Error => prefix.red().bold().to_string(),
    }
}

/// Format a byte count in human-readable form
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{}B", bytes)
    } else if bytes < MB {
        format!("{:.1}KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1}MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.2}GB", bytes as f64 / GB as f64)
    }
}

/// Create a progress bar counting written lines
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} lines ({per_sec})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ");
    pb.set_style(style);
    pb
}

/// Finish a progress bar with success
pub fn finish_progress_success(pb: ProgressBar, message: &str) {
    pb.finish();
    println!("{} {}", "✓".green(), message);
}

/// Finish a progress bar with error
pub fn finish_progress_error(pb: ProgressBar, message: &str) {
    pb.abandon();
    println!("{} {}", "✗".red(), message);
}
