//! File listener implementation

use super::format_line;
use crate::core::{LoggerError, Result, TimestampFormat, TraceEvent, TraceListener};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one text line per event to a file
pub struct FileListener {
    name: String,
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
    timestamp_format: TimestampFormat,
}

impl FileListener {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening trace file",
                    format!("cannot open '{}'", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            name: "file".to_string(),
            path,
            writer: Mutex::new(BufWriter::new(file)),
            timestamp_format: TimestampFormat::default(),
        })
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the timestamp format for this listener
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use twitch_logging::listeners::FileListener;
    /// use twitch_logging::TimestampFormat;
    ///
    /// let listener = FileListener::new("/var/log/twitch.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Rfc3339);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TraceListener for FileListener {
    fn trace(&self, event: &TraceEvent) -> Result<()> {
        let mut line = format_line(event, &self.timestamp_format);
        line.push('\n');

        self.writer.lock().write_all(line.as_bytes())?;
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

impl Drop for FileListener {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.get_mut().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EventType;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_line_per_event() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("trace.log");
        let listener = FileListener::new(&path).unwrap();

        listener
            .trace(&TraceEvent::new(EventType::Information, "Root", "first\nsecond"))
            .unwrap();
        let err = Arc::new(std::io::Error::other("timeout"));
        listener
            .trace(&TraceEvent::new(EventType::Error, "Root.Sub", "failed").with_error(err))
            .unwrap();
        listener.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first\\nsecond"));
        assert!(lines[1].contains("Root.Sub - failed | error: timeout"));
    }

    #[test]
    fn test_open_failure_is_reported() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("missing").join("trace.log");

        let err = FileListener::new(&path).err().expect("open should fail");
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }
}
