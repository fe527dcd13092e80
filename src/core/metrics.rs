//! Trace metrics for observability
//!
//! Counters for source resolution and event delivery, shared by a
//! [`SourceCache`](super::SourceCache) and every source it resolves.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for resolution and delivery
///
/// # Example
///
/// ```
/// use twitch_logging::TraceMetrics;
///
/// let metrics = TraceMetrics::new();
///
/// metrics.record_cache_miss();
/// metrics.record_cache_hit();
///
/// assert_eq!(metrics.cache_hits(), 1);
/// assert_eq!(metrics.cache_misses(), 1);
/// ```
#[derive(Debug)]
pub struct TraceMetrics {
    /// Resolutions answered from the cache
    cache_hits: AtomicU64,

    /// Resolutions that built a new source
    cache_misses: AtomicU64,

    /// Ancestor names probed while searching for configuration
    ancestor_probes: AtomicU64,

    /// Resolutions that ended on the `Default` source
    default_fallbacks: AtomicU64,

    /// Events handed to listeners without error
    events_delivered: AtomicU64,

    /// Events where at least one listener returned an error or panicked
    listener_failures: AtomicU64,
}

impl TraceMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            ancestor_probes: AtomicU64::new(0),
            default_fallbacks: AtomicU64::new(0),
            events_delivered: AtomicU64::new(0),
            listener_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn cache_misses(&self) -> u64 {
        self.cache_misses.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn ancestor_probes(&self) -> u64 {
        self.ancestor_probes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn default_fallbacks(&self) -> u64 {
        self.default_fallbacks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_delivered(&self) -> u64 {
        self.events_delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn listener_failures(&self) -> u64 {
        self.listener_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_cache_hit(&self) -> u64 {
        self.cache_hits.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_cache_miss(&self) -> u64 {
        self.cache_misses.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_ancestor_probe(&self) -> u64 {
        self.ancestor_probes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_default_fallback(&self) -> u64 {
        self.default_fallbacks.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.events_delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_listener_failure(&self) -> u64 {
        self.listener_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Cache hit rate as a percentage (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been resolved yet.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.cache_hits() as f64;
        let total = hits + self.cache_misses() as f64;
        if total == 0.0 {
            0.0
        } else {
            (hits / total) * 100.0
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.cache_hits.store(0, Ordering::Relaxed);
        self.cache_misses.store(0, Ordering::Relaxed);
        self.ancestor_probes.store(0, Ordering::Relaxed);
        self.default_fallbacks.store(0, Ordering::Relaxed);
        self.events_delivered.store(0, Ordering::Relaxed);
        self.listener_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for TraceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TraceMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            cache_hits: AtomicU64::new(self.cache_hits()),
            cache_misses: AtomicU64::new(self.cache_misses()),
            ancestor_probes: AtomicU64::new(self.ancestor_probes()),
            default_fallbacks: AtomicU64::new(self.default_fallbacks()),
            events_delivered: AtomicU64::new(self.events_delivered()),
            listener_failures: AtomicU64::new(self.listener_failures()),
        }
    }
}
