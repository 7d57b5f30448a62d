//! Opaque object handles and descriptor structs passed through traced calls.
//!
//! The engine never dereferences any of these; they only need to travel
//! through parameter blocks unchanged (or as rewritten by a prolog).

use std::ffi::c_void;

macro_rules! opaque_handle {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[repr(transparent)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub struct $name(*mut c_void);

            // SAFETY: handles are opaque tokens owned by the driver; the
            // tracing layer only copies them.
            unsafe impl Send for $name {}
            unsafe impl Sync for $name {}

            impl $name {
                #[must_use]
                pub const fn null() -> Self {
                    Self(std::ptr::null_mut())
                }

                #[must_use]
                pub const fn from_raw(raw: *mut c_void) -> Self {
                    Self(raw)
                }

                /// Build a handle from a bare address (tests and fake drivers).
                #[must_use]
                pub fn from_addr(addr: usize) -> Self {
                    Self(std::ptr::without_provenance_mut(addr))
                }

                #[must_use]
                pub const fn as_raw(self) -> *mut c_void {
                    self.0
                }

                #[must_use]
                pub fn addr(self) -> usize {
                    self.0.addr()
                }

                #[must_use]
                pub fn is_null(self) -> bool {
                    self.0.is_null()
                }
            }

            impl Default for $name {
                fn default() -> Self {
                    Self::null()
                }
            }
        )*
    };
}

opaque_handle! {
    DriverHandle;
    DeviceHandle;
    ContextHandle;
    CommandQueueHandle;
    CommandListHandle;
    FenceHandle;
    EventPoolHandle;
    EventHandle;
    ModuleHandle;
    ModuleBuildLogHandle;
    KernelHandle;
    ImageHandle;
    SamplerHandle;
}

/// `ze_init_flags_t`.
#[repr(transparent)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InitFlags(pub u32);

impl InitFlags {
    pub const GPU_ONLY: Self = Self(1);
    pub const VPU_ONLY: Self = Self(2);
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContextDesc {
    pub flags: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommandQueueDesc {
    pub ordinal: u32,
    pub index: u32,
    pub flags: u32,
    pub mode: u32,
    pub priority: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommandListDesc {
    pub command_queue_group_ordinal: u32,
    pub flags: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FenceDesc {
    pub flags: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventPoolDesc {
    pub flags: u32,
    pub count: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventDesc {
    pub index: u32,
    pub signal: u32,
    pub wait: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ModuleDesc {
    pub format: u32,
    pub input_size: usize,
    pub flags: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KernelDesc {
    pub flags: u32,
    pub name_id: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeviceMemAllocDesc {
    pub flags: u32,
    pub ordinal: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HostMemAllocDesc {
    pub flags: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImageDesc {
    pub flags: u32,
    pub kind: u32,
    pub width: u64,
    pub height: u32,
    pub depth: u32,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SamplerDesc {
    pub address_mode: u32,
    pub filter_mode: u32,
    pub normalized: bool,
}
