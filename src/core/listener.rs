//! Listener trait for trace output destinations

use super::{error::Result, trace_event::TraceEvent};

/// Name of the listener every unconfigured source starts with
pub const DEFAULT_LISTENER_NAME: &str = "Default";

/// Consumer of trace events.
///
/// One listener instance may be attached to many sources at once, so all
/// methods take `&self`; implementations guard mutable state themselves.
pub trait TraceListener: Send + Sync {
    fn trace(&self, event: &TraceEvent) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;

    /// True only for the built-in placeholder attached to unconfigured sources
    fn is_default(&self) -> bool {
        false
    }
}

/// Placeholder listener attached to every source nothing configured.
///
/// Discards events. A source whose only listener is this one counts as
/// unconfigured during hierarchical resolution.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultListener;

impl DefaultListener {
    pub fn new() -> Self {
        Self
    }
}

impl TraceListener for DefaultListener {
    fn trace(&self, _event: &TraceEvent) -> Result<()> {
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        DEFAULT_LISTENER_NAME
    }

    fn is_default(&self) -> bool {
        true
    }
}
