//! Pluggable configuration backend for trace sources

use super::{error::Result, source_level::SourceLevel, trace_source::TraceSource};

/// Where switch levels and listeners for a source name come from.
///
/// [`SourceCache`](super::SourceCache) only ever asks two things: build a
/// source for a name, and whether that source was explicitly configured.
///
/// # Example
///
/// ```
/// use twitch_logging::{Result, SourceConfiguration, SourceLevel, TraceSource};
///
/// /// Treats every name as unconfigured
/// struct NothingConfigured;
///
/// impl SourceConfiguration for NothingConfigured {
///     fn create_source(&self, name: &str, default_level: SourceLevel) -> Result<TraceSource> {
///         Ok(TraceSource::new(name, default_level))
///     }
/// }
///
/// let source = NothingConfigured.create_source("TwitchLib.Api", SourceLevel::Warning).unwrap();
/// assert!(!NothingConfigured.is_configured(&source));
/// ```
pub trait SourceConfiguration: Send + Sync {
    /// Build the source for `name`. Unconfigured names get a source at
    /// `default_level` carrying only the default listener.
    fn create_source(&self, name: &str, default_level: SourceLevel) -> Result<TraceSource>;

    /// A source is unconfigured when its listener set is exactly the single
    /// `Default` placeholder. Any other set counts as configured, including
    /// an explicitly empty one.
    fn is_configured(&self, source: &TraceSource) -> bool {
        !source.has_only_default_listener()
    }
}
