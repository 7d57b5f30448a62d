//! Engine-internal failures and their mapping onto driver result codes.

use thiserror::Error;

use crate::result::ZeResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("tracing layer has not been brought up by driver init")]
    Uninitialized,
    #[error("tracer handle is null")]
    NullHandle,
    #[error("tracer {0} is not registered")]
    UnknownTracer(u64),
}

impl From<TraceError> for ZeResult {
    fn from(err: TraceError) -> Self {
        match err {
            TraceError::Uninitialized => Self::ErrorUninitialized,
            TraceError::NullHandle => Self::ErrorInvalidNullHandle,
            TraceError::UnknownTracer(_) => Self::ErrorInvalidArgument,
        }
    }
}
