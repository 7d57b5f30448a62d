//! API tracing engine for the zetrace driver surface.
//!
//! Every catalogued driver entry point can be wrapped by any number of
//! independently registered tracers. A traced call runs:
//!
//! ```text
//! caller -> snapshot enabled tracers -> prologs -> real implementation -> epilogs -> caller
//! ```
//!
//! with prologs and epilogs both in registration order. Prologs may rewrite
//! arguments through the `&mut` parameter block, and each tracer has a
//! private instance data slot carried from its prolog to its epilog. Calls
//! made from inside a callback go straight to the real implementation.
//!
//! # Layout
//!
//! - **Catalog** (`api`): entry points, parameter blocks, callback and
//!   real-implementation tables
//! - **Tracers** (`tracer`, `registry`): lifecycle and per-call snapshots
//! - **Dispatch** (`dispatch`, `recursion`): the call protocol and the
//!   per-thread recursion guard
//! - **Layer** (`layer`): lifecycle state owning registry, metrics and log sink
//! - **Configuration** (`config`): environment switches
//! - **Observability** (`metrics`, `structured_log`)

pub mod api;
pub mod callback;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod handle;
pub mod layer;
pub mod metrics;
pub mod recursion;
pub mod registry;
pub mod result;
pub mod structured_log;
pub mod tracer;

pub use api::{DdiTable, EntryPoint, TracedCall, ZeCallbacks};
pub use callback::{CallbackRecord, InstanceData, TracerCallback, UserData};
pub use config::TracingMode;
pub use error::TraceError;
pub use layer::TracingLayer;
pub use metrics::{MetricsSnapshot, TracingMetrics};
pub use registry::{Snapshot, TracerRegistry};
pub use result::ZeResult;
pub use structured_log::{LogEmitter, LogEntry, LogLevel};
pub use tracer::{TracerDesc, TracerHandle};
