//! Listener implementations

#[cfg(feature = "console")]
pub mod console;
#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "file")]
pub mod json;
pub mod memory;
pub mod queued;

#[cfg(feature = "console")]
pub use console::ConsoleListener;
#[cfg(feature = "file")]
pub use file::FileListener;
#[cfg(feature = "file")]
pub use json::JsonListener;
pub use memory::MemoryListener;
pub use queued::QueuedListener;

pub use crate::core::{DefaultListener, TraceListener};

use crate::core::{TimestampFormat, TraceEvent};

/// `[timestamp] [TYPE   ] [thread] source - message | error: ...`
#[cfg_attr(not(any(feature = "console", feature = "file")), allow(dead_code))]
pub(crate) fn format_line(event: &TraceEvent, timestamp_format: &TimestampFormat) -> String {
    let mut line = format!(
        "[{}] [{:7}] [{}] {} - {}",
        timestamp_format.format(&event.timestamp),
        event.event_type.to_str(),
        event.thread_label(),
        event.source,
        event.message
    );

    if let Some(error) = event.error_text() {
        line.push_str(" | error: ");
        line.push_str(&error);
    }

    line
}
