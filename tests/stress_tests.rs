//! Stress tests for concurrent resolution and delivery
//!
//! These tests verify:
//! - Many threads resolving overlapping names share one source per name
//! - Concurrent emission through shared listeners loses nothing
//! - Queued listeners under load either deliver or count every event
//! - A panicking listener never takes down the others

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use tempfile::TempDir;
use twitch_logging::listeners::{FileListener, MemoryListener, QueuedListener};
use twitch_logging::prelude::*;
use twitch_logging::TraceEvent;

const THREADS: usize = 8;

fn capture_all(prefix: &str) -> (Arc<SourceCache>, Arc<MemoryListener>) {
    let memory = Arc::new(MemoryListener::new("memory"));
    let config = DiagnosticsConfig::builder()
        .listener("memory", memory.clone())
        .source(prefix, SourceSettings::new().switch_level(SourceLevel::All).listener("memory"))
        .build();
    (Arc::new(SourceCache::new(Arc::new(config))), memory)
}

/// Many threads resolving overlapping names end up with exactly one cached
/// source per name, and every thread sees that same source
#[test]
fn test_concurrent_resolution_of_overlapping_names() {
    let (cache, _memory) = capture_all("TwitchLib");
    let barrier = Arc::new(Barrier::new(THREADS));
    let names: Vec<String> = (0..50).map(|i| format!("TwitchLib.Module{}.Part{}", i % 10, i)).collect();
    let names = Arc::new(names);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            let names = Arc::clone(&names);
            thread::spawn(move || {
                barrier.wait();
                names
                    .iter()
                    .map(|name| {
                        let logger = TraceLogger::new(&cache, name.as_str()).unwrap();
                        Arc::as_ptr(logger.source()) as usize
                    })
                    .collect::<Vec<usize>>()
            })
        })
        .collect();

    let results: Vec<Vec<usize>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for result in &results[1..] {
        assert_eq!(result, &results[0], "threads resolved different sources");
    }
    assert_eq!(cache.len(), names.len());
    assert_eq!(cache.metrics().cache_misses(), names.len() as u64);
    assert_eq!(
        cache.metrics().cache_hits(),
        ((THREADS - 1) * names.len()) as u64
    );

    let distinct: HashSet<usize> = results[0].iter().copied().collect();
    assert_eq!(distinct.len(), names.len());
}

/// Concurrent emission through one shared listener keeps every event
#[test]
fn test_concurrent_emission_loses_nothing() {
    let (cache, memory) = capture_all("Chat");
    let per_thread = 500;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let logger = TraceLogger::new(&cache, format!("Chat.Channel{}", t)).unwrap();
                for i in 0..per_thread {
                    logger.info(&format!("message {}", i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(memory.len(), THREADS * per_thread);
    assert_eq!(
        cache.metrics().events_delivered(),
        (THREADS * per_thread) as u64
    );

    let sources: HashSet<String> = memory.events().into_iter().map(|e| e.source).collect();
    assert_eq!(sources.len(), THREADS);
}

/// Concurrent file writes produce whole lines only
#[test]
fn test_concurrent_file_writes_do_not_interleave() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("stress.log");
    let file = Arc::new(FileListener::new(&log_file).expect("Failed to create listener"));

    let config = DiagnosticsConfig::builder()
        .listener("file", file)
        .source("Api", SourceSettings::new().switch_level(SourceLevel::All).listener("file"))
        .build();
    let cache = Arc::new(SourceCache::new(Arc::new(config)));
    let per_thread = 200;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let logger = TraceLogger::new(&cache, format!("Api.Worker{}", t)).unwrap();
                for i in 0..per_thread {
                    logger.warn(&format!("worker {} line {}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    cache.flush_all();

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), THREADS * per_thread);
    for line in lines {
        assert!(line.contains("[WARNING]"), "mangled line: {}", line);
        assert!(line.contains(" - worker "), "mangled line: {}", line);
    }
}

/// A queued listener under load accounts for every event: delivered or dropped
#[test]
fn test_queued_listener_accounts_for_every_event() {
    let memory = Arc::new(MemoryListener::new("memory"));
    let queued = Arc::new(QueuedListener::new(memory.clone(), 16));
    let per_thread = 1_000;

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let queued = Arc::clone(&queued);
            thread::spawn(move || {
                for i in 0..per_thread {
                    let event = TraceEvent::new(
                        EventType::Information,
                        format!("Queue.T{}", t),
                        &format!("event {}", i),
                    );
                    queued.trace(&event).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    queued.flush().unwrap();

    let delivered = memory.len() as u64;
    assert_eq!(
        delivered + queued.dropped_count(),
        (THREADS * per_thread) as u64
    );
    assert!(delivered > 0);
}

/// Listener that panics on every event and counts the attempts
struct PanickingListener {
    calls: AtomicUsize,
}

impl TraceListener for PanickingListener {
    fn trace(&self, _event: &TraceEvent) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("listener exploded");
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

/// A panicking listener under concurrent load does not stop delivery to
/// the healthy listener next to it
#[test]
fn test_panicking_listener_is_isolated_under_load() {
    let memory = Arc::new(MemoryListener::new("memory"));
    let panicking = Arc::new(PanickingListener {
        calls: AtomicUsize::new(0),
    });
    let config = DiagnosticsConfig::builder()
        .listener("bad", panicking.clone())
        .listener("good", memory.clone())
        .source(
            "Fragile",
            SourceSettings::new()
                .switch_level(SourceLevel::All)
                .listener("bad")
                .listener("good"),
        )
        .build();
    let cache = Arc::new(SourceCache::new(Arc::new(config)));
    let per_thread = 50;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let logger = TraceLogger::new(&cache, "Fragile.Component").unwrap();
                for _ in 0..per_thread {
                    logger.error("still delivered");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("panic escaped the listener");
    }

    assert_eq!(memory.len(), 4 * per_thread);
    assert_eq!(panicking.calls.load(Ordering::SeqCst), 4 * per_thread);
    assert_eq!(cache.metrics().listener_failures(), (4 * per_thread) as u64);
}
