//! The tracing layer: lifecycle state, tracer registry, metrics and log sink.

use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::api::{TracedCall, ZeCallbacks};
use crate::error::TraceError;
use crate::metrics::{MetricsSnapshot, TracingMetrics};
use crate::registry::TracerRegistry;
use crate::result::ZeResult;
use crate::structured_log::{LogEmitter, LogEntry, LogLevel};
use crate::tracer::{TracerDesc, TracerHandle};

const STATE_DOWN: u8 = 0;
const STATE_UP: u8 = 1;

// 0 = logging off, otherwise `LogLevel::rank() + 1` of the sink threshold.
const LOG_OFF: u8 = 0;

/// Owns everything the tracing subsystem needs between driver init and
/// shutdown.
///
/// Tracer lifecycle calls fail with [`TraceError::Uninitialized`] while the
/// layer is down. [`TracingLayer::dispatch`] works in either state.
#[derive(Debug)]
pub struct TracingLayer {
    state: AtomicU8,
    pub(crate) registry: TracerRegistry,
    pub(crate) metrics: TracingMetrics,
    correlation: AtomicU64,
    log: Mutex<Option<LogEmitter>>,
    log_threshold: AtomicU8,
}

impl TracingLayer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(STATE_DOWN),
            registry: TracerRegistry::new(),
            metrics: TracingMetrics::new(),
            correlation: AtomicU64::new(0),
            log: Mutex::new(None),
            log_threshold: AtomicU8::new(LOG_OFF),
        }
    }

    /// Bring the layer up. Returns `false` if it already was.
    pub fn bring_up(&self) -> bool {
        let changed = self
            .state
            .compare_exchange(STATE_DOWN, STATE_UP, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if changed && self.log_enabled(LogLevel::Debug) {
            self.log(LogEntry::new(0, LogLevel::Debug, "layer_up"));
        }
        changed
    }

    /// Take the layer down and destroy every tracer. Returns how many were
    /// destroyed.
    pub fn tear_down(&self) -> usize {
        self.state.store(STATE_DOWN, Ordering::Release);
        let removed = self.registry.clear();
        TracingMetrics::add(&self.metrics.tracers_destroyed, removed as u64);
        if self.log_enabled(LogLevel::Debug) {
            self.log(
                LogEntry::new(0, LogLevel::Debug, "layer_down")
                    .with_details(serde_json::json!({ "tracers_destroyed": removed })),
            );
        }
        removed
    }

    #[must_use]
    pub fn is_up(&self) -> bool {
        self.state.load(Ordering::Acquire) == STATE_UP
    }

    fn ensure_up(&self) -> Result<(), TraceError> {
        if self.is_up() {
            Ok(())
        } else {
            Err(TraceError::Uninitialized)
        }
    }

    /// Register a new, disabled tracer.
    pub fn create_tracer(&self, desc: TracerDesc) -> Result<TracerHandle, TraceError> {
        self.ensure_up()?;
        let handle = self.registry.create(desc);
        TracingMetrics::inc(&self.metrics.tracers_created);
        self.log_lifecycle("tracer_created", handle);
        Ok(handle)
    }

    pub fn destroy_tracer(&self, handle: TracerHandle) -> Result<(), TraceError> {
        self.ensure_up()?;
        self.registry.destroy(handle)?;
        TracingMetrics::inc(&self.metrics.tracers_destroyed);
        self.log_lifecycle("tracer_destroyed", handle);
        Ok(())
    }

    pub fn set_prologues(
        &self,
        handle: TracerHandle,
        table: &ZeCallbacks,
    ) -> Result<(), TraceError> {
        self.ensure_up()?;
        self.registry.set_prologues(handle, table)
    }

    pub fn set_epilogues(
        &self,
        handle: TracerHandle,
        table: &ZeCallbacks,
    ) -> Result<(), TraceError> {
        self.ensure_up()?;
        self.registry.set_epilogues(handle, table)
    }

    pub fn set_enabled(&self, handle: TracerHandle, enabled: bool) -> Result<(), TraceError> {
        self.ensure_up()?;
        self.registry.set_enabled(handle, enabled)?;
        self.log_lifecycle(
            if enabled {
                "tracer_enabled"
            } else {
                "tracer_disabled"
            },
            handle,
        );
        Ok(())
    }

    #[must_use]
    pub fn registry(&self) -> &TracerRegistry {
        &self.registry
    }

    /// Run one traced call. See [`crate::dispatch::dispatch`].
    ///
    /// # Safety
    ///
    /// Same contract as [`crate::dispatch::dispatch`].
    #[inline]
    pub unsafe fn dispatch<P: TracedCall>(&self, params: P, real: P::Pfn) -> ZeResult {
        // SAFETY: forwarded from the caller.
        unsafe { crate::dispatch::dispatch(self, params, real) }
    }

    #[must_use]
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Next correlation id. Ids start at 1 and never repeat within a process
    /// lifetime of this layer.
    pub fn next_correlation_id(&self) -> u64 {
        self.correlation.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Install (or remove, with `None`) the log sink. Returns the previous one.
    pub fn set_log_sink(&self, sink: Option<LogEmitter>) -> Option<LogEmitter> {
        let mut guard = self.log.lock();
        let threshold = sink
            .as_ref()
            .map_or(LOG_OFF, |s| s.threshold().rank() + 1);
        let previous = std::mem::replace(&mut *guard, sink);
        self.log_threshold.store(threshold, Ordering::Release);
        previous
    }

    /// Whether a record at `level` would be written. Lock-free.
    #[inline]
    #[must_use]
    pub fn log_enabled(&self, level: LogLevel) -> bool {
        let threshold = self.log_threshold.load(Ordering::Acquire);
        threshold != LOG_OFF && level.rank() + 1 >= threshold
    }

    /// Write a record to the sink, if any. Write failures are dropped; a
    /// broken sink never fails a traced call.
    pub fn log(&self, entry: LogEntry) {
        if let Some(emitter) = self.log.lock().as_mut() {
            let _ = emitter.emit_entry(&entry);
        }
    }

    fn log_lifecycle(&self, event: &str, handle: TracerHandle) {
        if self.log_enabled(LogLevel::Debug) {
            self.log(LogEntry::new(0, LogLevel::Debug, event).with_tracer(handle.as_raw()));
        }
    }

    /// Return to the freshly constructed state: down, no tracers, zeroed
    /// counters, no log sink.
    pub fn reset(&self) {
        self.state.store(STATE_DOWN, Ordering::Release);
        self.registry.clear();
        self.metrics.reset();
        self.correlation.store(0, Ordering::Relaxed);
        self.set_log_sink(None);
    }
}

impl Default for TracingLayer {
    fn default() -> Self {
        Self::new()
    }
}
