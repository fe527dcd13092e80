//! # Twitch Logging
//!
//! Hierarchical trace-source logging for the Twitch API client.
//!
//! ## Features
//!
//! - **Named loggers**: dotted names such as `TwitchLib.Api.Helix`
//! - **Hierarchical configuration**: an unconfigured name inherits the switch
//!   level and listeners of its nearest configured ancestor, or of `Default`
//! - **Resolve once**: resolved sources are cached per name in a shared
//!   [`SourceCache`]
//! - **Pluggable backends**: [`SourceConfiguration`] decides what counts as
//!   configured; [`DiagnosticsConfig`] reads it from JSON
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use twitch_logging::listeners::MemoryListener;
//! use twitch_logging::prelude::*;
//!
//! let capture = Arc::new(MemoryListener::new("capture"));
//! let config = DiagnosticsConfig::builder()
//!     .listener("capture", capture.clone())
//!     .source("TwitchLib", SourceSettings::new().switch_level(SourceLevel::Warning).listener("capture"))
//!     .build();
//! let cache = Arc::new(SourceCache::new(Arc::new(config)));
//!
//! let logger = TraceLogger::new(&cache, "TwitchLib.Api.Helix").unwrap();
//! logger.info("filtered out");
//! logger.warn("kept");
//!
//! assert_eq!(capture.messages(), vec!["kept".to_string()]);
//! ```

pub mod config;
pub mod core;
pub mod listeners;
pub mod macros;

pub mod prelude {
    pub use crate::config::{DiagnosticsConfig, SourceSettings};
    pub use crate::core::{
        EventType, LogLevel, Logger, LoggerError, LoggerName, NullLogger, Result, SharedError,
        SourceCache, SourceConfiguration, SourceLevel, TraceListener, TraceLogger, TraceSource,
    };
}

pub use config::{
    DiagnosticsConfig, DiagnosticsConfigBuilder, DiagnosticsFile, ListenerConfig, ListenerSpec,
    SourceSettings,
};
pub use core::{
    to_backend_severity, to_event_type, to_library_severity, DefaultListener, EventType,
    LogLevel, Logger, LoggerError, LoggerName, NullLogger, Result, SharedError, SourceCache,
    SourceConfiguration, SourceLevel, TimestampFormat, TraceEvent, TraceListener, TraceLogger,
    TraceMetrics, TraceSource, DEFAULT_LISTENER_NAME, DEFAULT_SOURCE_NAME,
};
