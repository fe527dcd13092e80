//! Logging macros for ergonomic log message formatting.
//!
//! The message is only formatted when the logger's threshold lets the level
//! through. Any [`Logger`](crate::Logger) works, including `Box<dyn Logger>`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use twitch_logging::prelude::*;
//! use twitch_logging::info;
//!
//! let cache = Arc::new(SourceCache::new(Arc::new(DiagnosticsConfig::default())));
//! let logger = TraceLogger::new(&cache, "TwitchLib.Client").unwrap();
//!
//! info!(logger, "Connected");
//!
//! let channel = "twitchdev";
//! info!(logger, "Joined channel {}", channel);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use twitch_logging::prelude::*;
/// # let cache = Arc::new(SourceCache::new(Arc::new(DiagnosticsConfig::default())));
/// # let logger = TraceLogger::new(&cache, "Docs").unwrap();
/// use twitch_logging::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Status code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if $crate::Logger::is_enabled(logger, level) {
            $crate::Logger::log(logger, level, &format!($($arg)+));
        }
    }};
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use std::sync::Arc;
/// # use twitch_logging::prelude::*;
/// # let cache = Arc::new(SourceCache::new(Arc::new(DiagnosticsConfig::default())));
/// # let logger = TraceLogger::new(&cache, "Docs").unwrap();
/// use twitch_logging::warn;
/// warn!(logger, "Rate limit at {}%", 90);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
