//! Listener wrapper that hands events to a background worker
//!
//! Keeps slow listeners (files, remote collectors) off the caller's thread.
//! Events go through a bounded channel; when it is full new events are
//! dropped and counted rather than blocking the caller.

use crate::core::trace_source::{flush_isolated, panic_message};
use crate::core::{LoggerError, Result, TraceEvent, TraceListener};
use crossbeam_channel::{bounded, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long `flush` waits for the worker to acknowledge
pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

enum Command {
    Event(TraceEvent),
    Flush(Sender<()>),
}

pub struct QueuedListener {
    name: String,
    sender: Option<Sender<Command>>,
    worker: Option<thread::JoinHandle<()>>,
    dropped: AtomicU64,
}

impl QueuedListener {
    /// Wrap `inner`, queueing at most `capacity` events
    pub fn new(inner: Arc<dyn TraceListener>, capacity: usize) -> Self {
        let (sender, receiver) = bounded::<Command>(capacity.max(1));
        let name = format!("queued({})", inner.name());

        let worker = thread::spawn(move || {
            for command in receiver {
                match command {
                    Command::Event(event) => {
                        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                            inner.trace(&event)
                        }));
                        match result {
                            Ok(Ok(())) => {}
                            Ok(Err(e)) => {
                                eprintln!("[LOGGER ERROR] Listener '{}' failed: {}", inner.name(), e);
                            }
                            Err(panic_info) => {
                                eprintln!(
                                    "[LOGGER CRITICAL] Listener '{}' panicked: {}. \
                                     Queued delivery continues.",
                                    inner.name(),
                                    panic_message(&*panic_info)
                                );
                            }
                        }
                    }
                    Command::Flush(ack) => {
                        flush_isolated(inner.as_ref());
                        let _ = ack.send(());
                    }
                }
            }

            // Channel closed: push out whatever the inner listener buffered
            flush_isolated(inner.as_ref());
        });

        Self {
            name,
            sender: Some(sender),
            worker: Some(worker),
            dropped: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Events discarded because the queue was full
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn record_drop(&self) {
        let dropped = self.dropped.fetch_add(1, Ordering::Relaxed);

        // Alert on first drop and periodically thereafter
        if dropped == 0 || (dropped + 1).is_multiple_of(1000) {
            eprintln!(
                "[LOGGER WARNING] Listener '{}' queue full, {} events dropped. \
                 Consider increasing the queue capacity.",
                self.name,
                dropped + 1
            );
        }
    }
}

impl TraceListener for QueuedListener {
    fn trace(&self, event: &TraceEvent) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(LoggerError::ChannelSendError)?;

        match sender.try_send(Command::Event(event.clone())) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                self.record_drop();
                Ok(())
            }
            Err(TrySendError::Disconnected(_)) => Err(LoggerError::ChannelSendError),
        }
    }

    /// Waits until the worker has written everything queued before this call
    fn flush(&self) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(LoggerError::ChannelSendError)?;
        let (ack_tx, ack_rx) = bounded(1);

        sender
            .send(Command::Flush(ack_tx))
            .map_err(|_| LoggerError::ChannelSendError)?;
        ack_rx
            .recv_timeout(DEFAULT_FLUSH_TIMEOUT)
            .map_err(|_| LoggerError::listener(&self.name, "flush timed out"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for QueuedListener {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain and exit
        drop(self.sender.take());

        if let Some(handle) = self.worker.take() {
            if let Err(e) = handle.join() {
                eprintln!(
                    "[LOGGER ERROR] Queued listener worker panicked: {}",
                    panic_message(&*e)
                );
            }
        }

        let dropped = self.dropped_count();
        if dropped > 0 {
            eprintln!(
                "[LOGGER WARNING] Listener '{}' shut down with {} dropped events",
                self.name, dropped
            );
        }
    }
}
