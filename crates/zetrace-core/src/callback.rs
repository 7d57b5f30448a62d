//! Callback records, tracer user data and per-call instance data.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::result::ZeResult;

/// Caller-owned data attached to a tracer at creation.
///
/// The engine holds a shared reference and hands it, untouched, to every
/// callback of the owning tracer.
pub type UserData = Option<Arc<dyn Any + Send + Sync>>;

/// Signature shared by prologs and epilogs of the entry point whose
/// parameter block is `P`.
///
/// Prologs receive [`ZeResult::Success`] as `result` because the real call has
/// not happened yet; epilogs receive the real implementation's code.
pub type TracerCallback<P> = fn(
    params: &mut P,
    result: ZeResult,
    user_data: Option<&(dyn Any + Send + Sync)>,
    instance: &mut InstanceData,
);

/// Private slot carried from one tracer's prolog to the same tracer's epilog
/// within a single call.
#[derive(Default)]
pub struct InstanceData {
    slot: Option<Box<dyn Any + Send>>,
}

impl InstanceData {
    #[must_use]
    pub const fn empty() -> Self {
        Self { slot: None }
    }

    /// Store `value`, replacing anything previously stored.
    pub fn set<T: Any + Send>(&mut self, value: T) {
        self.slot = Some(Box::new(value));
    }

    #[must_use]
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.slot.as_deref().and_then(|v| v.downcast_ref::<T>())
    }

    #[must_use]
    pub fn get_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.slot.as_deref_mut().and_then(|v| v.downcast_mut::<T>())
    }

    /// Remove and return the stored value if it has type `T`.
    ///
    /// A value of a different type stays in the slot.
    pub fn take<T: Any>(&mut self) -> Option<T> {
        let boxed = self.slot.take()?;
        match boxed.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(other) => {
                self.slot = Some(other);
                None
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

impl fmt::Debug for InstanceData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceData")
            .field("occupied", &self.slot.is_some())
            .finish()
    }
}

/// One callback together with its tracer's user data.
pub struct CallbackRecord<P> {
    pub callback: TracerCallback<P>,
    pub user_data: UserData,
}

impl<P> CallbackRecord<P> {
    #[must_use]
    pub fn new(callback: TracerCallback<P>, user_data: UserData) -> Self {
        Self {
            callback,
            user_data,
        }
    }

    #[inline]
    pub fn invoke(&self, params: &mut P, result: ZeResult, instance: &mut InstanceData) {
        (self.callback)(params, result, self.user_data.as_deref(), instance);
    }
}

impl<P> Clone for CallbackRecord<P> {
    fn clone(&self) -> Self {
        Self {
            callback: self.callback,
            user_data: self.user_data.clone(),
        }
    }
}

impl<P> fmt::Debug for CallbackRecord<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRecord")
            .field("has_user_data", &self.user_data.is_some())
            .finish_non_exhaustive()
    }
}
