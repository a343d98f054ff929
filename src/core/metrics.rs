//! Dispatch counters
//!
//! Per-logger statistics: how many events reached the sink, how many were
//! filtered by the mask, and how many failures occurred on either side of
//! the dispatch.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct DispatchMetrics {
    /// Events that passed the mask and were handed to the sink
    accepted: AtomicU64,

    /// Events dropped by the mask check
    filtered: AtomicU64,

    /// Emit calls the sink reported as failed
    sink_failures: AtomicU64,

    /// Observer notifications that failed or panicked
    notify_failures: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            accepted: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            notify_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn notify_failures(&self) -> u64 {
        self.notify_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_accepted(&self) -> u64 {
        self.accepted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_notify_failure(&self) -> u64 {
        self.notify_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.accepted.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
        self.notify_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            accepted: AtomicU64::new(self.accepted()),
            filtered: AtomicU64::new(self.filtered()),
            sink_failures: AtomicU64::new(self.sink_failures()),
            notify_failures: AtomicU64::new(self.notify_failures()),
        }
    }
}
