//! The prolog / real call / epilog protocol, shared by every entry point.

use crate::api::TracedCall;
use crate::callback::InstanceData;
use crate::layer::TracingLayer;
use crate::metrics::TracingMetrics;
use crate::recursion::RecursionGuard;
use crate::result::ZeResult;
use crate::structured_log::{LogEntry, LogLevel};

/// Run one traced call of `P`'s entry point against `real`.
///
/// Nested calls on a thread already inside this function, and calls with no
/// enabled callback for the entry point, invoke `real` with the caller's
/// arguments and nothing else. Otherwise every prolog runs in registration
/// order, then `real` exactly once with the (possibly rewritten) arguments,
/// then every epilog in registration order. The real result is returned
/// unchanged.
///
/// # Safety
///
/// `params`, as rewritten by the enabled prologs, must satisfy `real`'s
/// contract (see [`TracedCall::call`]).
pub unsafe fn dispatch<P: TracedCall>(
    layer: &TracingLayer,
    mut params: P,
    real: P::Pfn,
) -> ZeResult {
    let Some(_guard) = RecursionGuard::enter() else {
        TracingMetrics::inc(&layer.metrics.recursion_bypasses);
        // SAFETY: caller upholds `real`'s contract.
        return unsafe { params.call(real) };
    };

    let snapshot = layer.registry.snapshot::<P>();
    if snapshot.is_empty() {
        TracingMetrics::inc(&layer.metrics.passthrough_calls);
        // SAFETY: caller upholds `real`'s contract.
        return unsafe { params.call(real) };
    }

    let mut slots: Vec<InstanceData> = (0..snapshot.slot_count())
        .map(|_| InstanceData::empty())
        .collect();

    for (slot, record) in &snapshot.prologues {
        record.invoke(&mut params, ZeResult::Success, &mut slots[*slot]);
    }

    // SAFETY: caller upholds `real`'s contract for the rewritten block.
    let result = unsafe { params.call(real) };

    let mut read_back = vec![false; slots.len()];
    for (slot, record) in &snapshot.epilogues {
        record.invoke(&mut params, result, &mut slots[*slot]);
        read_back[*slot] = true;
    }

    let metrics = &layer.metrics;
    TracingMetrics::inc(&metrics.traced_calls);
    TracingMetrics::add(&metrics.prologues_run, snapshot.prologues.len() as u64);
    TracingMetrics::add(&metrics.epilogues_run, snapshot.epilogues.len() as u64);

    let correlation_id = layer.next_correlation_id();

    // Only data no epilog could see is orphaned; an epilog may leave its
    // own slot populated after reading it.
    for (slot, data) in slots.iter().enumerate() {
        if data.is_empty() || read_back[slot] {
            continue;
        }
        TracingMetrics::inc(&metrics.orphaned_instance_data);
        if layer.log_enabled(LogLevel::Warn) {
            layer.log(
                LogEntry::new(correlation_id, LogLevel::Warn, "orphaned_instance_data")
                    .with_entry_point(P::ENTRY_POINT)
                    .with_tracer(snapshot.tracers[slot].as_raw()),
            );
        }
    }
    drop(slots);

    if layer.log_enabled(LogLevel::Trace) {
        layer.log(
            LogEntry::new(correlation_id, LogLevel::Trace, "call")
                .with_entry_point(P::ENTRY_POINT)
                .with_result(result)
                .with_details(serde_json::json!({
                    "prologues": snapshot.prologues.len(),
                    "epilogues": snapshot.epilogues.len(),
                })),
        );
    }

    result
}
