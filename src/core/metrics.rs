//! Context metrics for observability
//!
//! Counters describing what happened to trace calls: delivered, filtered
//! out, buffered before start, discarded from the pending buffer, and
//! appender failures.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use rust_logger_hierarchy::ContextMetrics;
///
/// let metrics = ContextMetrics::new();
/// metrics.record_logged();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.events_logged(), 1);
/// assert_eq!(metrics.events_filtered(), 1);
/// ```
#[derive(Debug)]
pub struct ContextMetrics {
    /// Events handed to the propagation path without an appender error
    events_logged: AtomicU64,

    /// Events dropped by a filter or level decision
    events_filtered: AtomicU64,

    /// Events captured while the context was not started
    events_buffered: AtomicU64,

    /// Buffered events evicted before they could be replayed
    events_discarded: AtomicU64,

    /// Trace calls where an appender returned an error
    append_failures: AtomicU64,
}

impl ContextMetrics {
    pub const fn new() -> Self {
        Self {
            events_logged: AtomicU64::new(0),
            events_filtered: AtomicU64::new(0),
            events_buffered: AtomicU64::new(0),
            events_discarded: AtomicU64::new(0),
            append_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_logged(&self) -> u64 {
        self.events_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_filtered(&self) -> u64 {
        self.events_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_buffered(&self) -> u64 {
        self.events_buffered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_discarded(&self) -> u64 {
        self.events_discarded.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn append_failures(&self) -> u64 {
        self.append_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.events_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.events_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_buffered(&self) -> u64 {
        self.events_buffered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_discarded(&self, count: u64) -> u64 {
        self.events_discarded.fetch_add(count, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_append_failure(&self) -> u64 {
        self.append_failures.fetch_add(1, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.events_logged.store(0, Ordering::Relaxed);
        self.events_filtered.store(0, Ordering::Relaxed);
        self.events_buffered.store(0, Ordering::Relaxed);
        self.events_discarded.store(0, Ordering::Relaxed);
        self.append_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for ContextMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ContextMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            events_logged: AtomicU64::new(self.events_logged()),
            events_filtered: AtomicU64::new(self.events_filtered()),
            events_buffered: AtomicU64::new(self.events_buffered()),
            events_discarded: AtomicU64::new(self.events_discarded()),
            append_failures: AtomicU64::new(self.append_failures()),
        }
    }
}
