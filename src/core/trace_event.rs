//! Trace event delivered to listeners

use super::source_level::EventType;
use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::sync::Arc;

/// Caller-supplied error object carried through to listeners untouched
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

// Thread-local caches for thread information to avoid repeated allocations
thread_local! {
    static THREAD_ID_CACHE: RefCell<Option<String>> = const { RefCell::new(None) };
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

fn get_thread_id() -> String {
    THREAD_ID_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| format!("{:?}", std::thread::current().id()))
            .clone()
    })
}

fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub event_type: EventType,
    /// Name of the source the event was traced through
    pub source: String,
    pub message: String,
    /// Present for data events
    pub error: Option<SharedError>,
    pub timestamp: DateTime<Utc>,
    pub thread_id: String,
    pub thread_name: Option<String>,
}

impl TraceEvent {
    /// Sanitize message to prevent log injection
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one event always renders as one line.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(event_type: EventType, source: impl Into<String>, message: &str) -> Self {
        Self {
            event_type,
            source: source.into(),
            message: Self::sanitize_message(message),
            error: None,
            timestamp: Utc::now(),
            thread_id: get_thread_id(),
            thread_name: get_thread_name(),
        }
    }

    pub fn with_error(mut self, error: SharedError) -> Self {
        self.error = Some(error);
        self
    }

    /// Data events carry an error object next to the message
    pub fn is_data(&self) -> bool {
        self.error.is_some()
    }

    /// Thread name if set, otherwise the thread id
    pub fn thread_label(&self) -> &str {
        self.thread_name.as_deref().unwrap_or(&self.thread_id)
    }

    /// Sanitized rendering of the attached error, if any
    pub fn error_text(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|err| Self::sanitize_message(&err.to_string()))
    }
}
