//! Shared cache of resolved trace sources
//!
//! Building a source's configuration means walking its dotted name up the
//! hierarchy until a configured ancestor turns up, so resolved sources are
//! cached by full logger name and reused by every logger with that name.

use super::{
    configuration::SourceConfiguration,
    log_level::LogLevel,
    logger_name::LoggerName,
    metrics::TraceMetrics,
    source_level::{to_backend_severity, SourceLevel},
    trace_source::{flush_isolated, panic_message, TraceSource},
};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Name of the source used when no part of a name is configured
pub const DEFAULT_SOURCE_NAME: &str = "Default";

/// Resolves logger names to trace sources, once per name.
///
/// Create one per process (or per isolated logging setup) and share it as
/// `Arc<SourceCache>` with every logger. Entries live as long as the cache.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use twitch_logging::{DiagnosticsConfig, LogLevel, LoggerName, SourceCache};
///
/// let cache = SourceCache::new(Arc::new(DiagnosticsConfig::default()));
/// let name = LoggerName::new("TwitchLib.Api.Helix").unwrap();
///
/// let first = cache.resolve(&name, LogLevel::Info);
/// let second = cache.resolve(&name, LogLevel::Debug);
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct SourceCache {
    sources: Mutex<HashMap<String, Arc<TraceSource>>>,
    configuration: Arc<dyn SourceConfiguration>,
    metrics: Arc<TraceMetrics>,
}

impl SourceCache {
    pub fn new(configuration: Arc<dyn SourceConfiguration>) -> Self {
        Self {
            sources: Mutex::new(HashMap::new()),
            configuration,
            metrics: Arc::new(TraceMetrics::new()),
        }
    }

    /// Resolve `name` to its source, building and caching it on first use.
    ///
    /// The whole lookup, ancestor search and insert runs under one lock so
    /// two threads resolving an unseen name always get the same source.
    /// Never fails: backend errors degrade to the `Default` source.
    pub fn resolve(&self, name: &LoggerName, default_level: LogLevel) -> Arc<TraceSource> {
        let mut sources = self.sources.lock();

        if let Some(source) = sources.get(name.as_str()) {
            self.metrics.record_cache_hit();
            return Arc::clone(source);
        }
        self.metrics.record_cache_miss();

        let level = to_backend_severity(default_level);
        let mut candidate = self
            .try_create(name.as_str(), level)
            .unwrap_or_else(|| TraceSource::new(name.as_str(), level));

        if !self.try_is_configured(&candidate) {
            let found = self.find_configured_ancestor(name, level);
            candidate.adopt(&found);
        }

        candidate.set_metrics(Arc::clone(&self.metrics));
        let source = Arc::new(candidate);
        sources.insert(name.as_str().to_string(), Arc::clone(&source));
        source
    }

    /// Nearest configured ancestor, or the `Default` source
    fn find_configured_ancestor(&self, name: &LoggerName, level: SourceLevel) -> TraceSource {
        for ancestor in name.ancestors() {
            self.metrics.record_ancestor_probe();
            if let Some(source) = self.try_create(ancestor, level) {
                if self.try_is_configured(&source) {
                    return source;
                }
            }
        }

        self.metrics.record_default_fallback();
        self.try_create(DEFAULT_SOURCE_NAME, level)
            .unwrap_or_else(|| TraceSource::new(DEFAULT_SOURCE_NAME, level))
    }

    /// Build a source through the backend; errors and panics count as absent
    fn try_create(&self, name: &str, level: SourceLevel) -> Option<TraceSource> {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.configuration.create_source(name, level)
        }));

        match result {
            Ok(Ok(source)) => Some(source),
            Ok(Err(e)) => {
                eprintln!(
                    "[LOGGER WARNING] Configuration for source '{}' ignored: {}",
                    name, e
                );
                None
            }
            Err(panic_info) => {
                eprintln!(
                    "[LOGGER CRITICAL] Configuration backend panicked building '{}': {}",
                    name,
                    panic_message(&*panic_info)
                );
                None
            }
        }
    }

    fn try_is_configured(&self, source: &TraceSource) -> bool {
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.configuration.is_configured(source)
        }))
        .unwrap_or(false)
    }

    /// Cached source for `name`, without resolving
    pub fn get(&self, name: &str) -> Option<Arc<TraceSource>> {
        self.sources.lock().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sources.lock().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.sources.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.lock().is_empty()
    }

    /// Cached names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sources.lock().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn configuration(&self) -> &Arc<dyn SourceConfiguration> {
        &self.configuration
    }

    pub fn metrics(&self) -> &TraceMetrics {
        &self.metrics
    }

    /// Flush every listener reachable from a cached source, once each
    pub fn flush_all(&self) {
        let sources: Vec<Arc<TraceSource>> = self.sources.lock().values().cloned().collect();

        let mut seen = HashSet::new();
        for source in &sources {
            for listener in source.listeners() {
                if seen.insert(Arc::as_ptr(listener) as *const ()) {
                    flush_isolated(listener.as_ref());
                }
            }
        }
    }
}

impl fmt::Debug for SourceCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceCache")
            .field("sources", &self.names())
            .finish()
    }
}
