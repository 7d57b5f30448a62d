//! Tracer lifecycle entry points (`zetTracerExp*`).
//!
//! Every function reports through `ZeResult`:
//! - tracing layer down: `ErrorUninitialized`
//! - null tracer handle: `ErrorInvalidNullHandle`
//! - handle not registered: `ErrorInvalidArgument`

use zetrace_core::recursion;
use zetrace_core::{
    LogEmitter, MetricsSnapshot, TraceError, TracerDesc, TracerHandle, ZeCallbacks, ZeResult,
};

use crate::layer_state::tracing_layer;

fn to_ze_result(outcome: Result<(), TraceError>) -> ZeResult {
    match outcome {
        Ok(()) => ZeResult::Success,
        Err(err) => err.into(),
    }
}

/// Create a disabled tracer. `ph_tracer` is written only on success.
pub fn zet_tracer_exp_create(desc: &TracerDesc, ph_tracer: &mut TracerHandle) -> ZeResult {
    match tracing_layer().create_tracer(desc.clone()) {
        Ok(handle) => {
            *ph_tracer = handle;
            ZeResult::Success
        }
        Err(err) => err.into(),
    }
}

/// Destroy a tracer. Calls already in flight keep the callbacks they
/// snapshotted.
pub fn zet_tracer_exp_destroy(h_tracer: TracerHandle) -> ZeResult {
    to_ze_result(tracing_layer().destroy_tracer(h_tracer))
}

pub fn zet_tracer_exp_set_prologues(h_tracer: TracerHandle, prologues: &ZeCallbacks) -> ZeResult {
    to_ze_result(tracing_layer().set_prologues(h_tracer, prologues))
}

pub fn zet_tracer_exp_set_epilogues(h_tracer: TracerHandle, epilogues: &ZeCallbacks) -> ZeResult {
    to_ze_result(tracing_layer().set_epilogues(h_tracer, epilogues))
}

pub fn zet_tracer_exp_set_enabled(h_tracer: TracerHandle, enable: bool) -> ZeResult {
    to_ze_result(tracing_layer().set_enabled(h_tracer, enable))
}

/// Release the calling thread's tracing state.
///
/// Refused with `ErrorHandleObjectInUse` from inside a traced call.
pub fn zet_tracing_thread_detach() -> ZeResult {
    if recursion::is_dispatching() {
        return ZeResult::ErrorHandleObjectInUse;
    }
    recursion::detach_current_thread();
    ZeResult::Success
}

#[must_use]
pub fn tracing_metrics() -> MetricsSnapshot {
    tracing_layer().metrics()
}

/// Replace the tracing layer's log sink. Returns the previous sink.
pub fn set_tracing_log_sink(sink: Option<LogEmitter>) -> Option<LogEmitter> {
    tracing_layer().set_log_sink(sink)
}
