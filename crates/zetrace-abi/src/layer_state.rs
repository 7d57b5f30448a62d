//! Global state for the tracing layer.
//!
//! One layer serves every traced entry point, so tracers registered through
//! the lifecycle functions are visible to all wrappers. The layer is
//! const-constructed; bringing it up is part of driver init.

use zetrace_core::TracingLayer;

static TRACING_LAYER: TracingLayer = TracingLayer::new();

/// The process-wide tracing layer.
#[must_use]
pub fn tracing_layer() -> &'static TracingLayer {
    &TRACING_LAYER
}
