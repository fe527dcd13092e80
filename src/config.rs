//! Diagnostics configuration: which sources are configured, with which
//! switch level and listeners
//!
//! Loaded once at start-up, usually from a JSON file:
//!
//! ```json
//! {
//!   "listeners": {
//!     "console": { "type": "console", "colors": false },
//!     "api_file": { "type": "file", "path": "twitch-api.log", "queue": 1024 }
//!   },
//!   "sources": {
//!     "TwitchLib.Api": { "switch_level": "Warning", "listeners": ["api_file"] },
//!     "Default": { "switch_level": "Error", "listeners": ["console"] }
//!   }
//! }
//! ```
//!
//! Names not listed under `sources` are unconfigured and resolve through
//! their ancestors (see [`SourceCache`](crate::SourceCache)).

use crate::core::{
    DefaultListener, LoggerError, Result, SourceConfiguration, SourceLevel, TimestampFormat,
    TraceListener, TraceSource,
};
use crate::listeners::{MemoryListener, QueuedListener};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Declarative description of a shared listener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ListenerSpec {
    #[cfg(feature = "console")]
    Console {
        #[serde(default = "default_colors")]
        colors: bool,
        #[serde(default)]
        timestamp: TimestampFormat,
    },
    #[cfg(feature = "file")]
    File {
        path: PathBuf,
        #[serde(default)]
        timestamp: TimestampFormat,
    },
    #[cfg(feature = "file")]
    Json {
        path: PathBuf,
        #[serde(default)]
        pretty: bool,
    },
    Memory,
}

#[cfg(feature = "console")]
fn default_colors() -> bool {
    true
}

/// A listener entry in the configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListenerConfig {
    #[serde(flatten)]
    pub spec: ListenerSpec,
    /// Deliver through a background queue of this capacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue: Option<usize>,
}

impl ListenerConfig {
    /// Instantiate the listener under `name`
    pub fn build(&self, name: &str) -> Result<Arc<dyn TraceListener>> {
        if name.is_empty() {
            return Err(LoggerError::config("listener", "name is empty"));
        }
        if self.queue == Some(0) {
            return Err(LoggerError::config(
                format!("listener '{}'", name),
                "queue capacity must be at least 1",
            ));
        }

        let listener: Arc<dyn TraceListener> = match &self.spec {
            #[cfg(feature = "console")]
            ListenerSpec::Console { colors, timestamp } => Arc::new(
                crate::listeners::ConsoleListener::with_colors(*colors)
                    .with_timestamp_format(timestamp.clone())
                    .with_name(name),
            ),
            #[cfg(feature = "file")]
            ListenerSpec::File { path, timestamp } => Arc::new(
                crate::listeners::FileListener::new(path)?
                    .with_timestamp_format(timestamp.clone())
                    .with_name(name),
            ),
            #[cfg(feature = "file")]
            ListenerSpec::Json { path, pretty } => {
                let listener = if *pretty {
                    crate::listeners::JsonListener::new_pretty(path)?
                } else {
                    crate::listeners::JsonListener::new(path)?
                };
                Arc::new(listener.with_name(name))
            }
            ListenerSpec::Memory => Arc::new(MemoryListener::new(name)),
        };

        Ok(match self.queue {
            Some(capacity) => Arc::new(QueuedListener::new(listener, capacity).with_name(name)),
            None => listener,
        })
    }
}

/// Settings for one configured source name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Switch level; the requested default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub switch_level: Option<SourceLevel>,
    /// Names of shared listeners, in delivery order
    #[serde(default)]
    pub listeners: Vec<String>,
    /// Keep the `Default` listener in front of the configured ones
    #[serde(default)]
    pub keep_default: bool,
}

impl SourceSettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn switch_level(mut self, level: SourceLevel) -> Self {
        self.switch_level = Some(level);
        self
    }

    #[must_use]
    pub fn listener(mut self, name: impl Into<String>) -> Self {
        self.listeners.push(name.into());
        self
    }

    #[must_use]
    pub fn keep_default(mut self, keep: bool) -> Self {
        self.keep_default = keep;
        self
    }
}

/// On-disk shape of the configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticsFile {
    #[serde(default)]
    pub listeners: HashMap<String, ListenerConfig>,
    #[serde(default)]
    pub sources: HashMap<String, SourceSettings>,
}

/// [`SourceConfiguration`] backed by a fixed table of sources and shared
/// listeners
#[derive(Default)]
pub struct DiagnosticsConfig {
    listeners: HashMap<String, Arc<dyn TraceListener>>,
    sources: HashMap<String, SourceSettings>,
}

impl DiagnosticsConfig {
    pub fn builder() -> DiagnosticsConfigBuilder {
        DiagnosticsConfigBuilder::new()
    }

    /// Build listeners and source table from a parsed file
    pub fn from_file_config(file: DiagnosticsFile) -> Result<Self> {
        let mut listeners = HashMap::with_capacity(file.listeners.len());
        for (name, config) in &file.listeners {
            listeners.insert(name.clone(), config.build(name)?);
        }

        Ok(Self {
            listeners,
            sources: file.sources,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: DiagnosticsFile = serde_json::from_str(json)?;
        Self::from_file_config(file)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading diagnostics configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json_str(&json)
    }

    pub fn listener(&self, name: &str) -> Option<&Arc<dyn TraceListener>> {
        self.listeners.get(name)
    }

    pub fn source_settings(&self, name: &str) -> Option<&SourceSettings> {
        self.sources.get(name)
    }

    /// Check names are non-empty and every source refers only to declared
    /// listeners.
    ///
    /// Resolution tolerates broken entries by skipping them; call this at
    /// start-up to fail loudly instead.
    pub fn validate(&self) -> Result<()> {
        if self.listeners.contains_key("") {
            return Err(LoggerError::config("listener", "name is empty"));
        }
        if self.sources.contains_key("") {
            return Err(LoggerError::config("source", "name is empty"));
        }

        let mut names: Vec<&String> = self.sources.keys().collect();
        names.sort();

        for source in names {
            for listener in &self.sources[source].listeners {
                if !self.listeners.contains_key(listener) {
                    return Err(LoggerError::unknown_listener(source.as_str(), listener.as_str()));
                }
            }
        }
        Ok(())
    }
}

impl SourceConfiguration for DiagnosticsConfig {
    fn create_source(&self, name: &str, default_level: SourceLevel) -> Result<TraceSource> {
        let Some(settings) = self.sources.get(name) else {
            return Ok(TraceSource::new(name, default_level));
        };

        let mut listeners: Vec<Arc<dyn TraceListener>> = Vec::new();
        if settings.keep_default {
            listeners.push(Arc::new(DefaultListener::new()));
        }
        for listener in &settings.listeners {
            let shared = self
                .listeners
                .get(listener)
                .ok_or_else(|| LoggerError::unknown_listener(name, listener.as_str()))?;
            listeners.push(Arc::clone(shared));
        }

        Ok(TraceSource::with_listeners(
            name,
            settings.switch_level.unwrap_or(default_level),
            listeners,
        ))
    }
}

impl fmt::Debug for DiagnosticsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut listeners: Vec<&String> = self.listeners.keys().collect();
        listeners.sort();
        f.debug_struct("DiagnosticsConfig")
            .field("listeners", &listeners)
            .field("sources", &self.sources)
            .finish()
    }
}

/// Programmatic construction of a [`DiagnosticsConfig`]
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use twitch_logging::listeners::MemoryListener;
/// use twitch_logging::{DiagnosticsConfig, SourceLevel, SourceSettings};
///
/// let config = DiagnosticsConfig::builder()
///     .listener("capture", Arc::new(MemoryListener::new("capture")))
///     .source(
///         "TwitchLib.Api",
///         SourceSettings::new().switch_level(SourceLevel::Verbose).listener("capture"),
///     )
///     .build();
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Default)]
pub struct DiagnosticsConfigBuilder {
    listeners: HashMap<String, Arc<dyn TraceListener>>,
    sources: HashMap<String, SourceSettings>,
}

impl DiagnosticsConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared listener under `name`
    #[must_use = "builder methods return a new value"]
    pub fn listener(mut self, name: impl Into<String>, listener: Arc<dyn TraceListener>) -> Self {
        self.listeners.insert(name.into(), listener);
        self
    }

    /// Configure the source called `name`
    #[must_use = "builder methods return a new value"]
    pub fn source(mut self, name: impl Into<String>, settings: SourceSettings) -> Self {
        self.sources.insert(name.into(), settings);
        self
    }

    pub fn build(self) -> DiagnosticsConfig {
        DiagnosticsConfig {
            listeners: self.listeners,
            sources: self.sources,
        }
    }
}
