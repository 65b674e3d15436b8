// CLI module - Command-line entry point for writing and inspecting logs

mod output;

use crate::config::LoggerConfig;
use crate::error::{LoggerError, Result};
use crate::logs::{list_log_files, reader, Logger};
use crate::severity::Severity;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Lumber - A leveled file logger with size-based rotation
#[derive(Parser)]
#[command(name = "lumber")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Logger configuration file (.toml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for log files (overrides the configuration file)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a single log line
    Write {
        /// Severity of the line (debug, info, error)
        level: Severity,

        /// Message text
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Write numbered lines to exercise rotation
    Fill {
        /// Number of lines to write
        #[arg(short, long, default_value = "1000")]
        lines: u64,

        /// Rotation threshold in megabytes
        #[arg(short, long)]
        size_mb: Option<u64>,
    },

    /// List log files with their sizes
    Files,

    /// Show the last lines across all log files
    Tail {
        /// Number of lines to display
        #[arg(short = 'n', long, default_value = "20")]
        lines: usize,

        /// Only show lines at or above this severity
        #[arg(short, long)]
        level: Option<Severity>,
    },
}

impl Cli {
    /// Run the CLI application
    pub fn run() -> Result<()> {
        init_tracing();
        let cli = Cli::parse();
        cli.execute()
    }

    fn execute(&self) -> Result<()> {
        let config = self.load_config()?;

        match &self.command {
            Commands::Write { level, message } => {
                match write_line(&config, *level, &message.join(" "))? {
                    Some(path) => output::print_written(*level, &path),
                    None => output::print_filtered(*level, config.level),
                }
                Ok(())
            }

            Commands::Fill { lines, size_mb } => fill(&config, *lines, *size_mb),

            Commands::Files => {
                let files = list_log_files(&config.directory, &config.file_prefix)?;
                output::print_files(&files);
                Ok(())
            }

            Commands::Tail { lines, level } => {
                let entries = reader::read_last_entries(
                    &config.directory,
                    &config.file_prefix,
                    *lines,
                    *level,
                )?;
                output::print_entries(&entries);
                Ok(())
            }
        }
    }

    /// Configuration file if given, defaults otherwise, then command-line overrides
    fn load_config(&self) -> Result<LoggerConfig> {
        let mut config = match &self.config {
            Some(path) => LoggerConfig::from_file(path)?,
            None => LoggerConfig::default(),
        };

        if let Some(dir) = &self.dir {
            config.directory = dir.clone();
        }

        Ok(config)
    }
}

/// Write one line, returning the file it went to or `None` if the level filtered it out
fn write_line(config: &LoggerConfig, level: Severity, message: &str) -> Result<Option<PathBuf>> {
    let logger = Logger::with_config(config)?;
    let path = if level.enabled_at(logger.level()) {
        logger.log(level, message)?;
        Some(logger.active_path()?)
    } else {
        None
    };
    logger.close()?;
    Ok(path)
}

/// Write `lines` numbered Info lines, stopping early on Ctrl-C
fn fill(config: &LoggerConfig, lines: u64, size_mb: Option<u64>) -> Result<()> {
    let logger = Logger::with_config(config)?;
    if let Some(size_mb) = size_mb {
        logger.set_max_file_size(size_mb)?;
    }

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .map_err(|e| LoggerError::Other(format!("Failed to install Ctrl-C handler: {}", e)))?;

    let pb = output::create_progress_bar(lines);
    let mut written = 0;
    for i in 0..lines {
        if interrupted.load(Ordering::SeqCst) {
            break;
        }
        crate::log_info!(logger, "fill line {:010}", i)?;
        written += 1;
        pb.inc(1);
    }

    let rotations = logger.rotations();
    logger.close()?;

    if interrupted.load(Ordering::SeqCst) {
        output::finish_progress_error(pb, &format!("Interrupted after {} lines", written));
    } else {
        output::finish_progress_success(pb, &format!("Wrote {} lines", written));
    }
    output::print_fill_summary(written, rotations, &config.directory);

    Ok(())
}

/// Install the stderr subscriber, `RUST_LOG` overrides the default `warn`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
