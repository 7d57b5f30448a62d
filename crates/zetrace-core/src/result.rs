//! Result codes of the driver API.
//!
//! The tracing engine never invents codes of its own: every engine condition
//! is expressed with one of the values below, and the real implementation's
//! code is always returned to the caller unchanged.

use std::fmt;

/// Driver API result code (`ze_result_t`).
#[repr(u32)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZeResult {
    #[default]
    Success = 0,
    NotReady = 1,
    ErrorDeviceLost = 0x7000_0001,
    ErrorOutOfHostMemory = 0x7000_0002,
    ErrorOutOfDeviceMemory = 0x7000_0003,
    ErrorModuleBuildFailure = 0x7000_0004,
    ErrorUninitialized = 0x7800_0001,
    ErrorUnsupportedVersion = 0x7800_0002,
    ErrorUnsupportedFeature = 0x7800_0003,
    ErrorInvalidArgument = 0x7800_0004,
    ErrorInvalidNullHandle = 0x7800_0005,
    ErrorHandleObjectInUse = 0x7800_0006,
    ErrorInvalidNullPointer = 0x7800_0007,
    ErrorUnknown = 0x7fff_fffe,
}

impl ZeResult {
    /// Every defined code, in numeric order.
    pub const ALL: [Self; 14] = [
        Self::Success,
        Self::NotReady,
        Self::ErrorDeviceLost,
        Self::ErrorOutOfHostMemory,
        Self::ErrorOutOfDeviceMemory,
        Self::ErrorModuleBuildFailure,
        Self::ErrorUninitialized,
        Self::ErrorUnsupportedVersion,
        Self::ErrorUnsupportedFeature,
        Self::ErrorInvalidArgument,
        Self::ErrorInvalidNullHandle,
        Self::ErrorHandleObjectInUse,
        Self::ErrorInvalidNullPointer,
        Self::ErrorUnknown,
    ];

    /// Raw `ze_result_t` value.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Map a raw code back onto a known variant.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.code() == code)
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Symbolic name as spelled in the C headers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "ZE_RESULT_SUCCESS",
            Self::NotReady => "ZE_RESULT_NOT_READY",
            Self::ErrorDeviceLost => "ZE_RESULT_ERROR_DEVICE_LOST",
            Self::ErrorOutOfHostMemory => "ZE_RESULT_ERROR_OUT_OF_HOST_MEMORY",
            Self::ErrorOutOfDeviceMemory => "ZE_RESULT_ERROR_OUT_OF_DEVICE_MEMORY",
            Self::ErrorModuleBuildFailure => "ZE_RESULT_ERROR_MODULE_BUILD_FAILURE",
            Self::ErrorUninitialized => "ZE_RESULT_ERROR_UNINITIALIZED",
            Self::ErrorUnsupportedVersion => "ZE_RESULT_ERROR_UNSUPPORTED_VERSION",
            Self::ErrorUnsupportedFeature => "ZE_RESULT_ERROR_UNSUPPORTED_FEATURE",
            Self::ErrorInvalidArgument => "ZE_RESULT_ERROR_INVALID_ARGUMENT",
            Self::ErrorInvalidNullHandle => "ZE_RESULT_ERROR_INVALID_NULL_HANDLE",
            Self::ErrorHandleObjectInUse => "ZE_RESULT_ERROR_HANDLE_OBJECT_IN_USE",
            Self::ErrorInvalidNullPointer => "ZE_RESULT_ERROR_INVALID_NULL_POINTER",
            Self::ErrorUnknown => "ZE_RESULT_ERROR_UNKNOWN",
        }
    }
}

impl fmt::Display for ZeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:08x})", self.name(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_raw_values() {
        for result in ZeResult::ALL {
            assert_eq!(ZeResult::from_code(result.code()), Some(result));
        }
        assert_eq!(ZeResult::from_code(0x1234), None);
    }

    #[test]
    fn uninitialized_matches_header_value() {
        assert_eq!(ZeResult::ErrorUninitialized.code(), 0x7800_0001);
        assert!(!ZeResult::ErrorUninitialized.is_success());
        assert!(ZeResult::default().is_success());
    }

    #[test]
    fn display_includes_name_and_hex() {
        let text = ZeResult::ErrorInvalidArgument.to_string();
        assert_eq!(text, "ZE_RESULT_ERROR_INVALID_ARGUMENT (0x78000004)");
    }
}
