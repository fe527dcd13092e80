//! Named trace source: a switch level plus a set of listeners

use super::{
    listener::{DefaultListener, TraceListener, DEFAULT_LISTENER_NAME},
    metrics::TraceMetrics,
    source_level::{EventType, SourceLevel},
    trace_event::{SharedError, TraceEvent},
};
use std::fmt;
use std::sync::Arc;

/// A resolved binding of a name to a switch level and listeners.
///
/// Sources are assembled by a [`SourceConfiguration`](super::SourceConfiguration)
/// and mutated only until the cache publishes them behind an `Arc`.
/// Tracing never takes the cache lock.
pub struct TraceSource {
    name: String,
    level: SourceLevel,
    listeners: Vec<Arc<dyn TraceListener>>,
    /// Attached by the cache when the source is published
    metrics: Option<Arc<TraceMetrics>>,
}

impl TraceSource {
    /// Source with only the [`DefaultListener`] attached
    pub fn new(name: impl Into<String>, level: SourceLevel) -> Self {
        let default: Arc<dyn TraceListener> = Arc::new(DefaultListener::new());
        Self::with_listeners(name, level, vec![default])
    }

    pub fn with_listeners(
        name: impl Into<String>,
        level: SourceLevel,
        listeners: Vec<Arc<dyn TraceListener>>,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            listeners,
            metrics: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> SourceLevel {
        self.level
    }

    pub fn listeners(&self) -> &[Arc<dyn TraceListener>] {
        &self.listeners
    }

    pub fn listener_names(&self) -> Vec<&str> {
        self.listeners.iter().map(|l| l.name()).collect()
    }

    pub fn set_level(&mut self, level: SourceLevel) {
        self.level = level;
    }

    pub fn add_listener(&mut self, listener: Arc<dyn TraceListener>) {
        self.listeners.push(listener);
    }

    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    /// True when the listener set is exactly one `Default` placeholder
    pub fn has_only_default_listener(&self) -> bool {
        matches!(
            self.listeners.as_slice(),
            [only] if only.is_default() && only.name() == DEFAULT_LISTENER_NAME
        )
    }

    /// Take over `other`'s switch level and listeners, keeping this name
    pub fn adopt(&mut self, other: &TraceSource) {
        self.level = other.level;
        self.listeners = other.listeners.clone();
    }

    pub(crate) fn set_metrics(&mut self, metrics: Arc<TraceMetrics>) {
        self.metrics = Some(metrics);
    }

    /// Whether the switch lets `event_type` through
    #[inline]
    pub fn should_trace(&self, event_type: EventType) -> bool {
        self.level.allows(event_type)
    }

    /// Trace a plain message
    pub fn trace_event(&self, event_type: EventType, message: &str) {
        if !self.should_trace(event_type) {
            return;
        }
        self.deliver(&TraceEvent::new(event_type, self.name.as_str(), message));
    }

    /// Trace a message together with an error object
    pub fn trace_data(&self, event_type: EventType, message: &str, error: SharedError) {
        if !self.should_trace(event_type) {
            return;
        }
        let event = TraceEvent::new(event_type, self.name.as_str(), message).with_error(error);
        self.deliver(&event);
    }

    /// Deliver to every listener with per-listener panic isolation.
    ///
    /// A failing listener is reported on stderr and counted; the remaining
    /// listeners still see the event.
    fn deliver(&self, event: &TraceEvent) {
        let mut has_error = false;

        for listener in &self.listeners {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener.trace(event)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Listener '{}' on source '{}' failed: {}",
                        listener.name(),
                        self.name,
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Listener '{}' on source '{}' panicked: {}. \
                         Other listeners continue to function.",
                        listener.name(),
                        self.name,
                        panic_message(&*panic_info)
                    );
                    has_error = true;
                }
            }
        }

        if let Some(metrics) = &self.metrics {
            if has_error {
                metrics.record_listener_failure();
            } else {
                metrics.record_delivered();
            }
        }
    }

    /// Flush every listener, isolating failures the same way as delivery
    pub fn flush(&self) {
        for listener in &self.listeners {
            flush_isolated(listener.as_ref());
        }
    }
}

pub(crate) fn flush_isolated(listener: &dyn TraceListener) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| listener.flush()));

    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            eprintln!("[LOGGER ERROR] Listener '{}' flush failed: {}", listener.name(), e);
        }
        Err(panic_info) => {
            eprintln!(
                "[LOGGER CRITICAL] Listener '{}' panicked during flush: {}",
                listener.name(),
                panic_message(&*panic_info)
            );
        }
    }
}

pub(crate) fn panic_message(panic_info: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

impl fmt::Debug for TraceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceSource")
            .field("name", &self.name)
            .field("level", &self.level)
            .field("listeners", &self.listener_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::{LoggerError, Result};
    use crate::listeners::MemoryListener;

    struct PanickingListener;

    impl TraceListener for PanickingListener {
        fn trace(&self, _event: &TraceEvent) -> Result<()> {
            panic!("listener exploded");
        }

        fn flush(&self) -> Result<()> {
            Err(LoggerError::listener("panicking", "cannot flush"))
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_new_source_is_unconfigured() {
        let source = TraceSource::new("Root", SourceLevel::Information);
        assert!(source.has_only_default_listener());
        assert_eq!(source.listener_names(), vec!["Default"]);
    }

    #[test]
    fn test_empty_listener_set_is_not_default() {
        let source = TraceSource::with_listeners("Root", SourceLevel::Information, Vec::new());
        assert!(!source.has_only_default_listener());
    }

    #[test]
    fn test_switch_filters_events() {
        let memory = Arc::new(MemoryListener::new("memory"));
        let source = TraceSource::with_listeners(
            "Root",
            SourceLevel::Warning,
            vec![memory.clone() as Arc<dyn TraceListener>],
        );

        source.trace_event(EventType::Information, "dropped");
        source.trace_event(EventType::Error, "kept");

        let events = memory.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message, "kept");
        assert_eq!(events[0].source, "Root");
    }

    #[test]
    fn test_adopt_keeps_own_name() {
        let memory: Arc<dyn TraceListener> = Arc::new(MemoryListener::new("memory"));
        let ancestor =
            TraceSource::with_listeners("A", SourceLevel::Error, vec![Arc::clone(&memory)]);
        let mut source = TraceSource::new("A.B", SourceLevel::Verbose);

        source.adopt(&ancestor);

        assert_eq!(source.name(), "A.B");
        assert_eq!(source.level(), SourceLevel::Error);
        assert!(Arc::ptr_eq(&source.listeners()[0], &memory));
    }

    #[test]
    fn test_panicking_listener_is_isolated() {
        let memory = Arc::new(MemoryListener::new("memory"));
        let metrics = Arc::new(TraceMetrics::new());
        let mut source = TraceSource::with_listeners(
            "Root",
            SourceLevel::All,
            vec![
                Arc::new(PanickingListener) as Arc<dyn TraceListener>,
                memory.clone() as Arc<dyn TraceListener>,
            ],
        );
        source.set_metrics(Arc::clone(&metrics));

        source.trace_event(EventType::Critical, "still delivered");
        source.flush();

        assert_eq!(memory.len(), 1);
        assert_eq!(metrics.listener_failures(), 1);
        assert_eq!(metrics.events_delivered(), 0);
    }

    #[test]
    fn test_unpublished_source_traces_without_metrics() {
        let memory = Arc::new(MemoryListener::new("memory"));
        let source = TraceSource::with_listeners(
            "Root",
            SourceLevel::All,
            vec![memory.clone() as Arc<dyn TraceListener>],
        );

        source.trace_event(EventType::Information, "delivered");

        assert!(source.metrics.is_none());
        assert_eq!(memory.len(), 1);
    }

    #[test]
    fn test_published_sources_share_cache_metrics() {
        let metrics = Arc::new(TraceMetrics::new());
        let memory: Arc<dyn TraceListener> = Arc::new(MemoryListener::new("memory"));
        let mut first = TraceSource::with_listeners("A", SourceLevel::All, vec![Arc::clone(&memory)]);
        let mut second = TraceSource::with_listeners("B", SourceLevel::All, vec![memory]);
        first.set_metrics(Arc::clone(&metrics));
        second.set_metrics(Arc::clone(&metrics));

        first.trace_event(EventType::Warning, "one");
        second.trace_event(EventType::Warning, "two");

        assert_eq!(metrics.events_delivered(), 2);
    }
}
