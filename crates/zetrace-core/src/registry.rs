//! Ordered tracer registry and per-call snapshots.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::api::{TracedCall, ZeCallbacks};
use crate::callback::CallbackRecord;
use crate::error::TraceError;
use crate::tracer::{Tracer, TracerDesc, TracerHandle};

/// Callbacks of one entry point, taken once per call.
///
/// Both lists are in tracer registration order and only cover tracers that
/// were enabled when the snapshot was taken. Each record carries the index
/// of its tracer's instance data slot; a tracer with both a prolog and an
/// epilog uses the same index in both lists.
#[derive(Debug)]
pub struct Snapshot<P> {
    pub prologues: Vec<(usize, CallbackRecord<P>)>,
    pub epilogues: Vec<(usize, CallbackRecord<P>)>,
    /// Handle of the tracer owning each slot.
    pub tracers: Vec<TracerHandle>,
}

impl<P> Snapshot<P> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prologues.is_empty() && self.epilogues.is_empty()
    }

    /// Number of instance data slots the call needs.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.tracers.len()
    }
}

impl<P> Default for Snapshot<P> {
    fn default() -> Self {
        Self {
            prologues: Vec::new(),
            epilogues: Vec::new(),
            tracers: Vec::new(),
        }
    }
}

/// Concurrent, insertion-ordered tracer collection.
///
/// Snapshots take the read lock; lifecycle calls take the write lock.
#[derive(Debug)]
pub struct TracerRegistry {
    tracers: RwLock<Vec<Tracer>>,
    next_id: AtomicU64,
}

impl TracerRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tracers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Append a disabled tracer and return its handle.
    pub fn create(&self, desc: TracerDesc) -> TracerHandle {
        let handle = TracerHandle::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.tracers.write().push(Tracer::new(handle, desc));
        handle
    }

    /// Remove a tracer. Snapshots already taken keep their own copies.
    pub fn destroy(&self, handle: TracerHandle) -> Result<(), TraceError> {
        Self::check_null(handle)?;
        let mut tracers = self.tracers.write();
        let pos = tracers
            .iter()
            .position(|t| t.handle == handle)
            .ok_or(TraceError::UnknownTracer(handle.as_raw()))?;
        tracers.remove(pos);
        Ok(())
    }

    /// Replace the whole prolog table.
    pub fn set_prologues(
        &self,
        handle: TracerHandle,
        table: &ZeCallbacks,
    ) -> Result<(), TraceError> {
        self.with_tracer(handle, |t| t.prologues = *table)
    }

    /// Replace the whole epilog table.
    pub fn set_epilogues(
        &self,
        handle: TracerHandle,
        table: &ZeCallbacks,
    ) -> Result<(), TraceError> {
        self.with_tracer(handle, |t| t.epilogues = *table)
    }

    pub fn set_enabled(&self, handle: TracerHandle, enabled: bool) -> Result<(), TraceError> {
        self.with_tracer(handle, |t| t.enabled = enabled)
    }

    pub fn is_enabled(&self, handle: TracerHandle) -> Result<bool, TraceError> {
        Self::check_null(handle)?;
        self.tracers
            .read()
            .iter()
            .find(|t| t.handle == handle)
            .map(Tracer::is_enabled)
            .ok_or(TraceError::UnknownTracer(handle.as_raw()))
    }

    #[must_use]
    pub fn contains(&self, handle: TracerHandle) -> bool {
        self.tracers.read().iter().any(|t| t.handle == handle)
    }

    /// Handles of all registered tracers, in registration order.
    #[must_use]
    pub fn handles(&self) -> Vec<TracerHandle> {
        self.tracers.read().iter().map(Tracer::handle).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tracers.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracers.read().is_empty()
    }

    /// Drop every tracer. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut tracers = self.tracers.write();
        let removed = tracers.len();
        tracers.clear();
        removed
    }

    /// Collect the callbacks registered for `P`'s entry point.
    ///
    /// Tracers that are disabled, or have neither a prolog nor an epilog for
    /// this entry point, get no slot.
    #[must_use]
    pub fn snapshot<P: TracedCall>(&self) -> Snapshot<P> {
        let tracers = self.tracers.read();
        let mut snap = Snapshot::default();
        for tracer in tracers.iter().filter(|t| t.enabled) {
            let prologue = P::callback(&tracer.prologues);
            let epilogue = P::callback(&tracer.epilogues);
            if prologue.is_none() && epilogue.is_none() {
                continue;
            }
            let slot = snap.tracers.len();
            snap.tracers.push(tracer.handle);
            if let Some(callback) = prologue {
                snap.prologues
                    .push((slot, CallbackRecord::new(callback, tracer.user_data.clone())));
            }
            if let Some(callback) = epilogue {
                snap.epilogues
                    .push((slot, CallbackRecord::new(callback, tracer.user_data.clone())));
            }
        }
        snap
    }

    fn check_null(handle: TracerHandle) -> Result<(), TraceError> {
        if handle.is_null() {
            Err(TraceError::NullHandle)
        } else {
            Ok(())
        }
    }

    fn with_tracer(
        &self,
        handle: TracerHandle,
        f: impl FnOnce(&mut Tracer),
    ) -> Result<(), TraceError> {
        Self::check_null(handle)?;
        let mut tracers = self.tracers.write();
        let tracer = tracers
            .iter_mut()
            .find(|t| t.handle == handle)
            .ok_or(TraceError::UnknownTracer(handle.as_raw()))?;
        f(tracer);
        Ok(())
    }
}

impl Default for TracerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
