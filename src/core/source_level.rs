//! Trace-source severities and their mapping to [`LogLevel`]
//!
//! A trace source filters through a switch holding a [`SourceLevel`]; each
//! emitted event carries an [`EventType`]. The mapping to and from the
//! library-neutral [`LogLevel`] is lossy in one place: `All` and `Verbose`
//! both become `Debug`, and `Debug` maps back to `Verbose`.

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Switch threshold of a trace source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceLevel {
    Off,
    Critical,
    Error,
    Warning,
    Information,
    Verbose,
    All,
    /// Activity events only (start/stop/transfer); carries no severity
    ActivityTracing,
}

/// Severity of a single trace event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EventType {
    Critical = 1,
    Error = 2,
    Warning = 3,
    Information = 4,
    Verbose = 5,
}

impl SourceLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            SourceLevel::Off => "Off",
            SourceLevel::Critical => "Critical",
            SourceLevel::Error => "Error",
            SourceLevel::Warning => "Warning",
            SourceLevel::Information => "Information",
            SourceLevel::Verbose => "Verbose",
            SourceLevel::All => "All",
            SourceLevel::ActivityTracing => "ActivityTracing",
        }
    }

    /// Number of severity buckets this switch lets through
    fn rank(&self) -> u8 {
        match self {
            SourceLevel::Off | SourceLevel::ActivityTracing => 0,
            SourceLevel::Critical => 1,
            SourceLevel::Error => 2,
            SourceLevel::Warning => 3,
            SourceLevel::Information => 4,
            SourceLevel::Verbose | SourceLevel::All => 5,
        }
    }

    /// Switch check: does a source at this level trace `event_type`?
    #[inline]
    pub fn allows(&self, event_type: EventType) -> bool {
        event_type as u8 <= self.rank()
    }
}

impl EventType {
    pub fn to_str(&self) -> &'static str {
        match self {
            EventType::Critical => "CRITICAL",
            EventType::Error => "ERROR",
            EventType::Warning => "WARNING",
            EventType::Information => "INFO",
            EventType::Verbose => "VERBOSE",
        }
    }

    /// Library level an event of this type was emitted at
    pub fn log_level(&self) -> LogLevel {
        match self {
            EventType::Critical => LogLevel::Fatal,
            EventType::Error => LogLevel::Error,
            EventType::Warning => LogLevel::Warn,
            EventType::Information => LogLevel::Info,
            EventType::Verbose => LogLevel::Debug,
        }
    }
}

impl fmt::Display for SourceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for SourceLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(SourceLevel::Off),
            "critical" => Ok(SourceLevel::Critical),
            "error" => Ok(SourceLevel::Error),
            "warning" => Ok(SourceLevel::Warning),
            "information" => Ok(SourceLevel::Information),
            "verbose" => Ok(SourceLevel::Verbose),
            "all" => Ok(SourceLevel::All),
            "activitytracing" => Ok(SourceLevel::ActivityTracing),
            _ => Err(format!("Invalid source level: '{}'", s)),
        }
    }
}

/// Map a source switch level onto the library's level
pub fn to_library_severity(level: SourceLevel) -> LogLevel {
    match level {
        SourceLevel::All | SourceLevel::Verbose => LogLevel::Debug,
        SourceLevel::Information => LogLevel::Info,
        SourceLevel::Warning => LogLevel::Warn,
        SourceLevel::Error => LogLevel::Error,
        SourceLevel::Critical => LogLevel::Fatal,
        SourceLevel::Off | SourceLevel::ActivityTracing => LogLevel::Off,
    }
}

/// Map a library level onto a source switch level
pub fn to_backend_severity(level: LogLevel) -> SourceLevel {
    match level {
        LogLevel::Debug => SourceLevel::Verbose,
        LogLevel::Info => SourceLevel::Information,
        LogLevel::Warn => SourceLevel::Warning,
        LogLevel::Error => SourceLevel::Error,
        LogLevel::Fatal => SourceLevel::Critical,
        LogLevel::Off => SourceLevel::Off,
    }
}

/// Event type used when emitting a message at `level`.
///
/// `Off` never reaches a source through a logger; it maps to `Verbose`.
pub fn to_event_type(level: LogLevel) -> EventType {
    match level {
        LogLevel::Debug | LogLevel::Off => EventType::Verbose,
        LogLevel::Info => EventType::Information,
        LogLevel::Warn => EventType::Warning,
        LogLevel::Error => EventType::Error,
        LogLevel::Fatal => EventType::Critical,
    }
}

impl From<SourceLevel> for LogLevel {
    fn from(level: SourceLevel) -> Self {
        to_library_severity(level)
    }
}

impl From<LogLevel> for SourceLevel {
    fn from(level: LogLevel) -> Self {
        to_backend_severity(level)
    }
}

impl From<LogLevel> for EventType {
    fn from(level: LogLevel) -> Self {
        to_event_type(level)
    }
}
