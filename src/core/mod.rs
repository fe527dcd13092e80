//! Core logger types and traits

pub mod cache;
pub mod configuration;
pub mod error;
pub mod listener;
pub mod log_level;
pub mod logger;
pub mod logger_name;
pub mod metrics;
pub mod source_level;
pub mod timestamp;
pub mod trace_event;
pub mod trace_source;

pub use cache::{SourceCache, DEFAULT_SOURCE_NAME};
pub use configuration::SourceConfiguration;
pub use error::{LoggerError, Result};
pub use listener::{DefaultListener, TraceListener, DEFAULT_LISTENER_NAME};
pub use log_level::LogLevel;
pub use logger::{Logger, NullLogger, TraceLogger};
pub use logger_name::LoggerName;
pub use metrics::TraceMetrics;
pub use source_level::{
    to_backend_severity, to_event_type, to_library_severity, EventType, SourceLevel,
};
pub use timestamp::TimestampFormat;
pub use trace_event::{SharedError, TraceEvent};
pub use trace_source::TraceSource;
