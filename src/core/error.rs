//! Error types for the trace logging system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Logger name or child label rejected
    #[error("Invalid logger name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// A source refers to a listener that was never declared
    #[error("Source '{source_name}' refers to unknown listener '{listener}'")]
    UnknownListener {
        source_name: String,
        listener: String,
    },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Listener failed to write an event
    #[error("Listener '{listener}' failed: {message}")]
    ListenerError { listener: String, message: String },

    /// Background worker of a queued listener is gone
    #[error("Failed to send trace event to background worker")]
    ChannelSendError,
}

impl LoggerError {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        LoggerError::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown listener error
    pub fn unknown_listener(source_name: impl Into<String>, listener: impl Into<String>) -> Self {
        LoggerError::UnknownListener {
            source_name: source_name.into(),
            listener: listener.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a listener error
    pub fn listener(listener: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ListenerError {
            listener: listener.into(),
            message: message.into(),
        }
    }
}
