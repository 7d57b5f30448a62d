//! Atomic counters for tracing-layer observability.
//!
//! All counters use relaxed ordering; they are diagnostic only.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operation counters of one tracing layer.
#[derive(Debug)]
pub struct TracingMetrics {
    /// Calls that ran at least one prolog or epilog.
    pub traced_calls: AtomicU64,
    /// Calls with no enabled callback for their entry point.
    pub passthrough_calls: AtomicU64,
    /// Nested calls that went straight to the real implementation.
    pub recursion_bypasses: AtomicU64,
    pub prologues_run: AtomicU64,
    pub epilogues_run: AtomicU64,
    /// Instance data still populated after the epilogs finished.
    pub orphaned_instance_data: AtomicU64,
    pub tracers_created: AtomicU64,
    pub tracers_destroyed: AtomicU64,
}

impl TracingMetrics {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            traced_calls: AtomicU64::new(0),
            passthrough_calls: AtomicU64::new(0),
            recursion_bypasses: AtomicU64::new(0),
            prologues_run: AtomicU64::new(0),
            epilogues_run: AtomicU64::new(0),
            orphaned_instance_data: AtomicU64::new(0),
            tracers_created: AtomicU64::new(0),
            tracers_destroyed: AtomicU64::new(0),
        }
    }

    pub fn inc(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add(counter: &AtomicU64, n: u64) {
        if n != 0 {
            counter.fetch_add(n, Ordering::Relaxed);
        }
    }

    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            traced_calls: Self::get(&self.traced_calls),
            passthrough_calls: Self::get(&self.passthrough_calls),
            recursion_bypasses: Self::get(&self.recursion_bypasses),
            prologues_run: Self::get(&self.prologues_run),
            epilogues_run: Self::get(&self.epilogues_run),
            orphaned_instance_data: Self::get(&self.orphaned_instance_data),
            tracers_created: Self::get(&self.tracers_created),
            tracers_destroyed: Self::get(&self.tracers_destroyed),
            attached_threads: crate::recursion::attached_thread_count() as u64,
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        for counter in [
            &self.traced_calls,
            &self.passthrough_calls,
            &self.recursion_bypasses,
            &self.prologues_run,
            &self.epilogues_run,
            &self.orphaned_instance_data,
            &self.tracers_created,
            &self.tracers_destroyed,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

impl Default for TracingMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub traced_calls: u64,
    pub passthrough_calls: u64,
    pub recursion_bypasses: u64,
    pub prologues_run: u64,
    pub epilogues_run: u64,
    pub orphaned_instance_data: u64,
    pub tracers_created: u64,
    pub tracers_destroyed: u64,
    /// Process-wide, not per layer.
    pub attached_threads: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let m = TracingMetrics::new();
        let snap = m.snapshot();
        assert_eq!(snap.traced_calls, 0);
        assert_eq!(snap.orphaned_instance_data, 0);
    }

    #[test]
    fn increment_and_reset() {
        let m = TracingMetrics::new();
        TracingMetrics::inc(&m.traced_calls);
        TracingMetrics::inc(&m.traced_calls);
        TracingMetrics::add(&m.prologues_run, 4);
        let snap = m.snapshot();
        assert_eq!(snap.traced_calls, 2);
        assert_eq!(snap.prologues_run, 4);

        m.reset();
        assert_eq!(m.snapshot().traced_calls, 0);
        assert_eq!(m.snapshot().prologues_run, 0);
    }
}
