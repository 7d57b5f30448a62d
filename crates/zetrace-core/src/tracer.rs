//! Tracer identity and state.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::api::ZeCallbacks;
use crate::callback::UserData;

/// Opaque tracer handle (`zet_tracer_exp_handle_t`). Zero is null.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TracerHandle(u64);

impl TracerHandle {
    pub const NULL: Self = Self(0);

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_raw(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TracerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tracer#{}", self.0)
    }
}

/// Creation parameters (`zet_tracer_exp_desc_t`).
#[derive(Clone, Default)]
pub struct TracerDesc {
    pub user_data: UserData,
}

impl TracerDesc {
    #[must_use]
    pub fn with_user_data(user_data: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            user_data: Some(user_data),
        }
    }
}

impl fmt::Debug for TracerDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracerDesc")
            .field("has_user_data", &self.user_data.is_some())
            .finish()
    }
}

/// One registered observer.
pub struct Tracer {
    pub(crate) handle: TracerHandle,
    pub(crate) user_data: UserData,
    pub(crate) prologues: ZeCallbacks,
    pub(crate) epilogues: ZeCallbacks,
    pub(crate) enabled: bool,
}

impl Tracer {
    /// A new tracer starts disabled with empty tables.
    pub(crate) fn new(handle: TracerHandle, desc: TracerDesc) -> Self {
        Self {
            handle,
            user_data: desc.user_data,
            prologues: ZeCallbacks::EMPTY,
            epilogues: ZeCallbacks::EMPTY,
            enabled: false,
        }
    }

    #[must_use]
    pub fn handle(&self) -> TracerHandle {
        self.handle
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("handle", &self.handle)
            .field("enabled", &self.enabled)
            .field("prologues", &self.prologues.registered())
            .field("epilogues", &self.epilogues.registered())
            .finish()
    }
}
