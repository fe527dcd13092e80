//! Console listener implementation

use super::format_line;
use crate::core::{EventType, Result, TimestampFormat, TraceEvent, TraceListener};
use colored::Colorize;

pub struct ConsoleListener {
    name: String,
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleListener {
    pub fn new() -> Self {
        Self {
            name: "console".to_string(),
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Rename the listener, e.g. to match its key in a configuration file
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the timestamp format for this listener
    ///
    /// # Examples
    ///
    /// ```
    /// use twitch_logging::listeners::ConsoleListener;
    /// use twitch_logging::TimestampFormat;
    ///
    /// let listener = ConsoleListener::new()
    ///     .with_timestamp_format(TimestampFormat::Iso8601Micros);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn render(&self, event: &TraceEvent) -> String {
        let line = format_line(event, &self.timestamp_format);
        if self.use_colors {
            line.color(event.event_type.log_level().color_code()).to_string()
        } else {
            line
        }
    }
}

impl Default for ConsoleListener {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceListener for ConsoleListener {
    fn trace(&self, event: &TraceEvent) -> Result<()> {
        let output = self.render(event);

        // Route Error and Critical events to stderr, others to stdout
        match event.event_type {
            EventType::Error | EventType::Critical => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
