//! In-memory listener that keeps every event it receives

use crate::core::{Result, TraceEvent, TraceListener};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Captures events for later inspection.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use twitch_logging::listeners::MemoryListener;
/// use twitch_logging::{EventType, SourceLevel, TraceListener, TraceSource};
///
/// let memory = Arc::new(MemoryListener::new("capture"));
/// let source = TraceSource::with_listeners(
///     "TwitchLib",
///     SourceLevel::All,
///     vec![memory.clone() as Arc<dyn TraceListener>],
/// );
///
/// source.trace_event(EventType::Information, "connected");
/// assert_eq!(memory.messages(), vec!["connected".to_string()]);
/// ```
#[derive(Debug)]
pub struct MemoryListener {
    name: String,
    events: Mutex<Vec<TraceEvent>>,
    flushes: AtomicU64,
}

impl MemoryListener {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            events: Mutex::new(Vec::new()),
            flushes: AtomicU64::new(0),
        }
    }

    /// Snapshot of captured events, oldest first
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events.lock().iter().map(|e| e.message.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Remove and return everything captured so far
    pub fn take(&self) -> Vec<TraceEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn flush_count(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }
}

impl Default for MemoryListener {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl TraceListener for MemoryListener {
    fn trace(&self, event: &TraceEvent) -> Result<()> {
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.flushes.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
