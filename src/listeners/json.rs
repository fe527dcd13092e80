//! JSON listener for structured trace output

use crate::core::{EventType, Result, TraceEvent, TraceListener};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// JSON file listener for structured logging
///
/// Writes each event as a single-line JSON object (JSONL format)
/// Compatible with log aggregation tools like ELK, Loki, etc.
pub struct JsonListener {
    name: String,
    writer: Mutex<BufWriter<File>>,
    pretty: bool,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    timestamp: &'a DateTime<Utc>,
    level: EventType,
    source: &'a str,
    message: &'a str,
    thread: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl JsonListener {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            name: "json".to_string(),
            writer: Mutex::new(BufWriter::new(file)),
            pretty: false,
        })
    }

    /// Create a new JSON listener with pretty printing
    pub fn new_pretty<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut listener = Self::new(path)?;
        listener.pretty = true;
        Ok(listener)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl TraceListener for JsonListener {
    fn trace(&self, event: &TraceEvent) -> Result<()> {
        let record = JsonRecord {
            timestamp: &event.timestamp,
            level: event.event_type,
            source: &event.source,
            message: &event.message,
            thread: event.thread_label(),
            error: event.error.as_ref().map(|e| e.to_string()),
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&record)?
        } else {
            serde_json::to_string(&record)?
        };

        writeln!(self.writer.lock(), "{}", json)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for JsonListener {
    fn drop(&mut self) {
        let _ = self.writer.get_mut().flush();
    }
}
