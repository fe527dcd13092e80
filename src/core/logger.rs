//! Logger capability and its trace-source backed implementation

use super::{
    cache::SourceCache,
    error::Result,
    log_level::LogLevel,
    logger_name::LoggerName,
    source_level::{to_event_type, to_library_severity},
    trace_event::SharedError,
    trace_source::TraceSource,
};
use std::fmt;
use std::sync::Arc;

/// What the rest of the client library logs through.
///
/// Implementors supply `name`, `level`, `emit` and `create_child`; the
/// level checks and per-severity entry points are provided.
pub trait Logger: Send + Sync {
    fn name(&self) -> &str;

    /// Current threshold
    fn level(&self) -> LogLevel;

    /// Emit `message` at `level`. Filtered-out levels are dropped silently.
    fn emit(&self, level: LogLevel, message: &str, error: Option<SharedError>);

    /// Logger named `"{name}.{label}"`
    fn create_child(&self, label: &str) -> Result<Box<dyn Logger>>;

    #[inline]
    fn is_enabled(&self, level: LogLevel) -> bool {
        self.level().allows(level)
    }

    fn is_debug_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Debug)
    }

    fn is_info_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Info)
    }

    fn is_warn_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Warn)
    }

    fn is_error_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Error)
    }

    fn is_fatal_enabled(&self) -> bool {
        self.is_enabled(LogLevel::Fatal)
    }

    #[inline]
    fn log(&self, level: LogLevel, message: &str) {
        self.emit(level, message, None);
    }

    #[inline]
    fn debug(&self, message: &str) {
        self.emit(LogLevel::Debug, message, None);
    }

    #[inline]
    fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message, None);
    }

    #[inline]
    fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, message, None);
    }

    #[inline]
    fn error(&self, message: &str) {
        self.emit(LogLevel::Error, message, None);
    }

    #[inline]
    fn fatal(&self, message: &str) {
        self.emit(LogLevel::Fatal, message, None);
    }

    fn debug_with_error(&self, message: &str, error: SharedError) {
        self.emit(LogLevel::Debug, message, Some(error));
    }

    fn info_with_error(&self, message: &str, error: SharedError) {
        self.emit(LogLevel::Info, message, Some(error));
    }

    fn warn_with_error(&self, message: &str, error: SharedError) {
        self.emit(LogLevel::Warn, message, Some(error));
    }

    fn error_with_error(&self, message: &str, error: SharedError) {
        self.emit(LogLevel::Error, message, Some(error));
    }

    fn fatal_with_error(&self, message: &str, error: SharedError) {
        self.emit(LogLevel::Fatal, message, Some(error));
    }
}

macro_rules! forward_logger {
    ($($ty:ty),+) => {$(
        impl<T: Logger + ?Sized> Logger for $ty {
            fn name(&self) -> &str {
                (**self).name()
            }

            fn level(&self) -> LogLevel {
                (**self).level()
            }

            fn emit(&self, level: LogLevel, message: &str, error: Option<SharedError>) {
                (**self).emit(level, message, error)
            }

            fn create_child(&self, label: &str) -> Result<Box<dyn Logger>> {
                (**self).create_child(label)
            }

            fn is_enabled(&self, level: LogLevel) -> bool {
                (**self).is_enabled(level)
            }
        }
    )+};
}

// Shared and boxed loggers work wherever a `Logger` is expected
forward_logger!(&T, Box<T>, Arc<T>);

/// Logger that writes through a named [`TraceSource`].
///
/// The source is looked up in a shared [`SourceCache`]: an exact match on the
/// name if it is configured, otherwise the nearest configured ancestor, and
/// finally the `Default` source. The logger's threshold is taken from the
/// resolved source's switch, so configuration overrides the requested level.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use twitch_logging::{DiagnosticsConfig, LogLevel, Logger, SourceCache, TraceLogger};
///
/// let cache = Arc::new(SourceCache::new(Arc::new(DiagnosticsConfig::default())));
/// let logger = TraceLogger::with_level(&cache, "TwitchLib.Api", LogLevel::Warn).unwrap();
///
/// assert_eq!(logger.level(), LogLevel::Warn);
/// logger.warn("rate limit close");
///
/// let child = logger.child("Helix").unwrap();
/// assert_eq!(child.name(), "TwitchLib.Api.Helix");
/// ```
#[derive(Clone)]
pub struct TraceLogger {
    name: LoggerName,
    level: LogLevel,
    source: Arc<TraceSource>,
    cache: Arc<SourceCache>,
}

impl TraceLogger {
    /// Logger requesting the default `Info` threshold
    pub fn new(cache: &Arc<SourceCache>, name: impl Into<String>) -> Result<Self> {
        Self::with_level(cache, name, LogLevel::default())
    }

    /// Logger requesting `level`; the resolved source's switch has the final say
    pub fn with_level(
        cache: &Arc<SourceCache>,
        name: impl Into<String>,
        level: LogLevel,
    ) -> Result<Self> {
        Ok(Self::from_name(cache, LoggerName::new(name)?, level))
    }

    pub fn from_name(cache: &Arc<SourceCache>, name: LoggerName, level: LogLevel) -> Self {
        let source = cache.resolve(&name, level);
        Self {
            level: to_library_severity(source.level()),
            name,
            source,
            cache: Arc::clone(cache),
        }
    }

    /// Child logger named `"{name}.{label}"`, resolved independently
    /// starting from this logger's current threshold
    pub fn child(&self, label: &str) -> Result<TraceLogger> {
        Ok(Self::from_name(&self.cache, self.name.child(label)?, self.level))
    }

    pub fn logger_name(&self) -> &LoggerName {
        &self.name
    }

    pub fn source(&self) -> &Arc<TraceSource> {
        &self.source
    }

    pub fn flush(&self) {
        self.source.flush();
    }
}

impl Logger for TraceLogger {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn level(&self) -> LogLevel {
        self.level
    }

    fn emit(&self, level: LogLevel, message: &str, error: Option<SharedError>) {
        if !self.is_enabled(level) {
            return;
        }

        let event_type = to_event_type(level);
        match error {
            None => self.source.trace_event(event_type, message),
            Some(error) => self.source.trace_data(event_type, message, error),
        }
    }

    fn create_child(&self, label: &str) -> Result<Box<dyn Logger>> {
        Ok(Box::new(self.child(label)?))
    }
}

impl fmt::Debug for TraceLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceLogger")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("source", &self.source)
            .finish()
    }
}

/// Logger that discards everything
#[derive(Debug, Clone, Default)]
pub struct NullLogger {
    name: String,
}

impl NullLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Logger for NullLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> LogLevel {
        LogLevel::Off
    }

    fn emit(&self, _level: LogLevel, _message: &str, _error: Option<SharedError>) {}

    fn create_child(&self, label: &str) -> Result<Box<dyn Logger>> {
        let name = if self.name.is_empty() {
            label.to_string()
        } else {
            format!("{}.{}", self.name, label)
        };
        Ok(Box::new(NullLogger::new(name)))
    }
}
