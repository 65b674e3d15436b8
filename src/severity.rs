use crate::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered importance of a log line, `Debug < Info < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "SeverityRepr", into = "String")]
pub enum Severity {
    #[default]
    Debug = 1,
    Info = 2,
    Error = 3,
}

/// All severities in ascending order
pub const ALL: [Severity; 3] = [Severity::Debug, Severity::Info, Severity::Error];

impl Severity {
    /// Prefix written at the start of every line of this severity
    pub fn prefix(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
        }
    }

    /// Whether a line of this severity passes a `min` threshold
    pub fn enabled_at(self, min: Severity) -> bool {
        self >= min
    }

    /// Numeric code used by the JSON configuration format
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Severity::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Severity::Debug),
            2 => Some(Severity::Info),
            3 => Some(Severity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, LoggerError> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "error" => Ok(Severity::Error),
            _ => Err(LoggerError::ConfigError(format!(
                "Invalid level: {}. Must be one of: debug, info, error",
                s
            ))),
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.to_string()
    }
}

// Config files may carry the level either by name or by numeric code
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Code(u8),
    Name(String),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = LoggerError;

    fn try_from(repr: SeverityRepr) -> Result<Self, LoggerError> {
        match repr {
            SeverityRepr::Code(code) => Severity::from_code(code).ok_or_else(|| {
                LoggerError::ConfigError(format!("Invalid level code: {}. Must be 1, 2 or 3", code))
            }),
            SeverityRepr::Name(name) => name.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Error);
        assert_eq!(Severity::default(), Severity::Debug);
    }

    #[test]
    fn test_strict_filtering_for_every_level() {
        for min in ALL {
            for severity in ALL {
                assert_eq!(severity.enabled_at(min), severity >= min);
            }
        }
        assert!(!Severity::Info.enabled_at(Severity::Error));
        assert!(!Severity::Debug.enabled_at(Severity::Info));
        assert!(Severity::Error.enabled_at(Severity::Error));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("debug".parse::<Severity>().unwrap(), Severity::Debug);
        assert_eq!("Info".parse::<Severity>().unwrap(), Severity::Info);
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
        assert!("warn".parse::<Severity>().is_err());
    }

    #[test]
    fn test_deserialize_name_or_code() {
        let by_name: Severity = serde_json::from_str("\"info\"").unwrap();
        let by_code: Severity = serde_json::from_str("3").unwrap();
        assert_eq!(by_name, Severity::Info);
        assert_eq!(by_code, Severity::Error);
        assert!(serde_json::from_str::<Severity>("7").is_err());
    }

    #[test]
    fn test_serialize_as_name() {
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
    }
}
