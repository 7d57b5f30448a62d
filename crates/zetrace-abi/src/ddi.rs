//! Driver dispatch tables.
//!
//! Driver init installs the real-implementation table. Applications fetch
//! the table they should call through [`dispatch_table`]: the traced
//! wrappers while the tracing layer is up, otherwise the real table itself,
//! so the untraced path never touches the tracer registry.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use zetrace_core::config::{self, TracingMode};
use zetrace_core::{DdiTable, LogEmitter, TracedCall, ZeResult};

use crate::layer_state::tracing_layer;
use crate::{core_api, event_api, fence_api, image_api, memory_api, module_api};

static REAL_TABLE: RwLock<DdiTable> = RwLock::new(DdiTable::EMPTY);
static DRIVER_READY: AtomicBool = AtomicBool::new(false);

/// Install `real` and, if `ZETRACE_API_TRACING` asks for it, bring the
/// tracing layer up.
pub fn driver_init(real: DdiTable) -> ZeResult {
    driver_init_with_mode(real, config::tracing_mode())
}

/// [`driver_init`] with an explicit tracing mode instead of the environment.
pub fn driver_init_with_mode(real: DdiTable, mode: TracingMode) -> ZeResult {
    *REAL_TABLE.write() = real;
    DRIVER_READY.store(true, Ordering::Release);

    let layer = tracing_layer();
    if let Some(level) = config::log_level() {
        layer.set_log_sink(Some(LogEmitter::to_stderr(level)));
    }
    if mode.is_enabled() {
        layer.bring_up();
    }
    ZeResult::Success
}

/// Tear tracing down (destroying every tracer) and uninstall the real table.
pub fn driver_shutdown() {
    tracing_layer().tear_down();
    *REAL_TABLE.write() = DdiTable::EMPTY;
    DRIVER_READY.store(false, Ordering::Release);
}

/// Whether a real table is installed.
#[must_use]
pub fn is_driver_initialized() -> bool {
    DRIVER_READY.load(Ordering::Acquire)
}

/// The table applications should call through.
#[must_use]
pub fn dispatch_table() -> DdiTable {
    if tracing_layer().is_up() {
        traced_dispatch_table()
    } else {
        real_dispatch_table()
    }
}

/// Copy of the installed real-implementation table.
#[must_use]
pub fn real_dispatch_table() -> DdiTable {
    *REAL_TABLE.read()
}

/// A table whose every slot is the traced wrapper.
#[must_use]
pub fn traced_dispatch_table() -> DdiTable {
    let mut table = DdiTable::EMPTY;
    core_api::install_traced(&mut table);
    fence_api::install_traced(&mut table);
    event_api::install_traced(&mut table);
    module_api::install_traced(&mut table);
    memory_api::install_traced(&mut table);
    image_api::install_traced(&mut table);
    table
}

/// Real implementation of `P`'s entry point, if installed.
///
/// The read lock is released before the caller dispatches, so callbacks may
/// re-enter the driver freely.
pub(crate) fn real_fn<P: TracedCall>() -> Option<P::Pfn> {
    P::real(&REAL_TABLE.read())
}

/// Restore the process to its pre-init state: no real table, tracing layer
/// down with no tracers, counters zeroed, no log sink.
pub fn reset_for_tests() {
    tracing_layer().reset();
    *REAL_TABLE.write() = DdiTable::EMPTY;
    DRIVER_READY.store(false, Ordering::Release);
}
