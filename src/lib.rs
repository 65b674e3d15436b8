// Library exports for lumber, a leveled file logger with size-based rotation

mod macros;

pub mod cli;
pub mod config;
pub mod error;
pub mod logs;
pub mod severity;

pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use logs::Logger;
pub use severity::Severity;
