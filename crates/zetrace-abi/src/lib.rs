//! # zetrace-abi
//!
//! Driver-facing surface of the tracing layer.
//!
//! Every catalogued entry point has a traced wrapper (`ze_*_tracing`) with
//! the real entry point's parameter list. Wrappers forward to the single
//! process-wide [`zetrace_core::TracingLayer`], which runs prologs, the real
//! implementation installed by [`ddi::driver_init`], and epilogs.
//!
//! # Architecture
//!
//! ```text
//! app -> dispatch_table() -> ze_*_tracing -> TracingLayer::dispatch -> real table
//!                       \-> real table (tracing down)
//! ```
//!
//! Tracers are managed through the `zet_tracer_exp_*` functions in
//! [`tracer_api`].

mod macros;

mod layer_state;

pub mod core_api;
pub mod ddi;
pub mod event_api;
pub mod fence_api;
pub mod image_api;
pub mod memory_api;
pub mod module_api;
pub mod tracer_api;

pub use ddi::{
    dispatch_table, driver_init, driver_init_with_mode, driver_shutdown, is_driver_initialized,
    real_dispatch_table, reset_for_tests, traced_dispatch_table,
};
pub use layer_state::tracing_layer;
pub use tracer_api::{
    set_tracing_log_sink, tracing_metrics, zet_tracer_exp_create, zet_tracer_exp_destroy,
    zet_tracer_exp_set_enabled, zet_tracer_exp_set_epilogues, zet_tracer_exp_set_prologues,
    zet_tracing_thread_detach,
};
