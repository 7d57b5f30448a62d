//! Entry point catalog.
//!
//! Every traced entry point is declared once in [`entry_points!`], which
//! produces:
//!
//! - a variant of [`EntryPoint`] with the API's C name,
//! - the real-implementation signature (`Pfn*`),
//! - the parameter block struct (`*Params`) with one field per argument,
//! - the [`TracedCall`] impl tying those together,
//! - a field in the callback table [`ZeCallbacks`] and in the
//!   real-implementation table [`DdiTable`].
//!
//! The dispatch protocol itself lives in one generic function
//! ([`crate::dispatch::dispatch`]); nothing here is per-call logic.

use std::ffi::{c_char, c_void};

use crate::callback::TracerCallback;
use crate::handle::{
    CommandListDesc, CommandListHandle, CommandQueueDesc, CommandQueueHandle, ContextDesc,
    ContextHandle, DeviceHandle, DeviceMemAllocDesc, DriverHandle, EventDesc, EventHandle,
    EventPoolDesc, EventPoolHandle, FenceDesc, FenceHandle, HostMemAllocDesc, ImageDesc,
    ImageHandle, InitFlags, KernelDesc, KernelHandle, ModuleBuildLogHandle, ModuleDesc,
    ModuleHandle, SamplerDesc, SamplerHandle,
};
use crate::result::ZeResult;

/// Binds a parameter block type to its entry point.
pub trait TracedCall: Sized {
    /// Entry point this parameter block belongs to.
    const ENTRY_POINT: EntryPoint;

    /// Real-implementation function type.
    type Pfn: Copy;

    /// This entry point's slot in a tracer's callback table.
    fn callback(table: &ZeCallbacks) -> Option<TracerCallback<Self>>;

    /// This entry point's slot in a real-implementation table.
    fn real(table: &DdiTable) -> Option<Self::Pfn>;

    /// Call `pfn` with the block's current argument values.
    ///
    /// # Safety
    ///
    /// The current field values must satisfy `pfn`'s contract: every
    /// pointer argument valid for the reads and writes the real
    /// implementation performs through it.
    unsafe fn call(&self, pfn: Self::Pfn) -> ZeResult;
}

macro_rules! entry_points {
    ($(
        $variant:ident, $field:ident, $name:literal, $params:ident, $pfn:ident {
            $($arg:ident : $ty:ty),* $(,)?
        }
    )*) => {
        /// Identifier of one traced entry point.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum EntryPoint {
            $($variant,)*
        }

        impl EntryPoint {
            /// Every catalogued entry point, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// C name of the entry point, e.g. `zeFenceCreate`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Look an entry point up by its C name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|ep| ep.name() == name)
            }
        }

        $(
            #[doc = concat!("Real implementation of `", $name, "`.")]
            pub type $pfn = unsafe extern "C" fn($($ty),*) -> ZeResult;

            #[doc = concat!("Parameter block of `", $name, "`.")]
            #[derive(Debug, Clone, Copy, PartialEq)]
            pub struct $params {
                $(pub $arg: $ty,)*
            }

            impl TracedCall for $params {
                const ENTRY_POINT: EntryPoint = EntryPoint::$variant;
                type Pfn = $pfn;

                #[inline]
                fn callback(table: &ZeCallbacks) -> Option<TracerCallback<Self>> {
                    table.$field
                }

                #[inline]
                fn real(table: &DdiTable) -> Option<$pfn> {
                    table.$field
                }

                #[inline]
                unsafe fn call(&self, pfn: $pfn) -> ZeResult {
                    // SAFETY: forwarded from the caller.
                    unsafe { pfn($(self.$arg),*) }
                }
            }
        )*

        /// Per-entry-point prolog or epilog table of one tracer.
        ///
        /// `None` entries are skipped by the engine.
        #[derive(Clone, Copy, Default)]
        pub struct ZeCallbacks {
            $(pub $field: Option<TracerCallback<$params>>,)*
        }

        impl ZeCallbacks {
            pub const EMPTY: Self = Self {
                $($field: None,)*
            };

            /// Whether a callback is registered for `entry_point`.
            #[must_use]
            pub const fn has(&self, entry_point: EntryPoint) -> bool {
                match entry_point {
                    $(EntryPoint::$variant => self.$field.is_some(),)*
                }
            }

            /// Number of registered callbacks.
            #[must_use]
            pub fn registered(&self) -> usize {
                EntryPoint::ALL.iter().filter(|ep| self.has(**ep)).count()
            }
        }

        /// Real-implementation table installed by driver init.
        #[derive(Clone, Copy, Default)]
        pub struct DdiTable {
            $(pub $field: Option<$pfn>,)*
        }

        impl DdiTable {
            pub const EMPTY: Self = Self {
                $($field: None,)*
            };

            /// Whether a real implementation is installed for `entry_point`.
            #[must_use]
            pub const fn has(&self, entry_point: EntryPoint) -> bool {
                match entry_point {
                    $(EntryPoint::$variant => self.$field.is_some(),)*
                }
            }
        }
    };
}

entry_points! {
    Init, init, "zeInit", InitParams, PfnInit {
        flags: InitFlags,
    }
    DriverGet, driver_get, "zeDriverGet", DriverGetParams, PfnDriverGet {
        p_count: *mut u32,
        ph_drivers: *mut DriverHandle,
    }

    ContextCreate, context_create, "zeContextCreate", ContextCreateParams, PfnContextCreate {
        h_driver: DriverHandle,
        desc: *const ContextDesc,
        ph_context: *mut ContextHandle,
    }
    ContextDestroy, context_destroy, "zeContextDestroy", ContextDestroyParams, PfnContextDestroy {
        h_context: ContextHandle,
    }
    ContextMakeMemoryResident, context_make_memory_resident, "zeContextMakeMemoryResident",
    ContextMakeMemoryResidentParams, PfnContextMakeMemoryResident {
        h_context: ContextHandle,
        h_device: DeviceHandle,
        ptr: *mut c_void,
        size: usize,
    }
    ContextEvictMemory, context_evict_memory, "zeContextEvictMemory",
    ContextEvictMemoryParams, PfnContextEvictMemory {
        h_context: ContextHandle,
        h_device: DeviceHandle,
        ptr: *mut c_void,
        size: usize,
    }

    CommandQueueCreate, command_queue_create, "zeCommandQueueCreate",
    CommandQueueCreateParams, PfnCommandQueueCreate {
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const CommandQueueDesc,
        ph_command_queue: *mut CommandQueueHandle,
    }
    CommandQueueDestroy, command_queue_destroy, "zeCommandQueueDestroy",
    CommandQueueDestroyParams, PfnCommandQueueDestroy {
        h_command_queue: CommandQueueHandle,
    }
    CommandQueueExecuteCommandLists, command_queue_execute_command_lists,
    "zeCommandQueueExecuteCommandLists",
    CommandQueueExecuteCommandListsParams, PfnCommandQueueExecuteCommandLists {
        h_command_queue: CommandQueueHandle,
        num_command_lists: u32,
        ph_command_lists: *mut CommandListHandle,
        h_fence: FenceHandle,
    }
    CommandQueueSynchronize, command_queue_synchronize, "zeCommandQueueSynchronize",
    CommandQueueSynchronizeParams, PfnCommandQueueSynchronize {
        h_command_queue: CommandQueueHandle,
        timeout: u64,
    }

    CommandListCreate, command_list_create, "zeCommandListCreate",
    CommandListCreateParams, PfnCommandListCreate {
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const CommandListDesc,
        ph_command_list: *mut CommandListHandle,
    }
    CommandListDestroy, command_list_destroy, "zeCommandListDestroy",
    CommandListDestroyParams, PfnCommandListDestroy {
        h_command_list: CommandListHandle,
    }
    CommandListClose, command_list_close, "zeCommandListClose",
    CommandListCloseParams, PfnCommandListClose {
        h_command_list: CommandListHandle,
    }
    CommandListReset, command_list_reset, "zeCommandListReset",
    CommandListResetParams, PfnCommandListReset {
        h_command_list: CommandListHandle,
    }
    CommandListAppendBarrier, command_list_append_barrier, "zeCommandListAppendBarrier",
    CommandListAppendBarrierParams, PfnCommandListAppendBarrier {
        h_command_list: CommandListHandle,
        h_signal_event: EventHandle,
        num_wait_events: u32,
        ph_wait_events: *mut EventHandle,
    }
    CommandListAppendMemoryCopy, command_list_append_memory_copy,
    "zeCommandListAppendMemoryCopy",
    CommandListAppendMemoryCopyParams, PfnCommandListAppendMemoryCopy {
        h_command_list: CommandListHandle,
        dstptr: *mut c_void,
        srcptr: *const c_void,
        size: usize,
        h_signal_event: EventHandle,
        num_wait_events: u32,
        ph_wait_events: *mut EventHandle,
    }

    FenceCreate, fence_create, "zeFenceCreate", FenceCreateParams, PfnFenceCreate {
        h_command_queue: CommandQueueHandle,
        desc: *const FenceDesc,
        ph_fence: *mut FenceHandle,
    }
    FenceDestroy, fence_destroy, "zeFenceDestroy", FenceDestroyParams, PfnFenceDestroy {
        h_fence: FenceHandle,
    }
    FenceHostSynchronize, fence_host_synchronize, "zeFenceHostSynchronize",
    FenceHostSynchronizeParams, PfnFenceHostSynchronize {
        h_fence: FenceHandle,
        timeout: u64,
    }
    FenceQueryStatus, fence_query_status, "zeFenceQueryStatus",
    FenceQueryStatusParams, PfnFenceQueryStatus {
        h_fence: FenceHandle,
    }
    FenceReset, fence_reset, "zeFenceReset", FenceResetParams, PfnFenceReset {
        h_fence: FenceHandle,
    }

    EventPoolCreate, event_pool_create, "zeEventPoolCreate",
    EventPoolCreateParams, PfnEventPoolCreate {
        h_context: ContextHandle,
        desc: *const EventPoolDesc,
        num_devices: u32,
        ph_devices: *mut DeviceHandle,
        ph_event_pool: *mut EventPoolHandle,
    }
    EventPoolDestroy, event_pool_destroy, "zeEventPoolDestroy",
    EventPoolDestroyParams, PfnEventPoolDestroy {
        h_event_pool: EventPoolHandle,
    }
    EventCreate, event_create, "zeEventCreate", EventCreateParams, PfnEventCreate {
        h_event_pool: EventPoolHandle,
        desc: *const EventDesc,
        ph_event: *mut EventHandle,
    }
    EventDestroy, event_destroy, "zeEventDestroy", EventDestroyParams, PfnEventDestroy {
        h_event: EventHandle,
    }
    EventHostSignal, event_host_signal, "zeEventHostSignal",
    EventHostSignalParams, PfnEventHostSignal {
        h_event: EventHandle,
    }
    EventHostSynchronize, event_host_synchronize, "zeEventHostSynchronize",
    EventHostSynchronizeParams, PfnEventHostSynchronize {
        h_event: EventHandle,
        timeout: u64,
    }
    EventQueryStatus, event_query_status, "zeEventQueryStatus",
    EventQueryStatusParams, PfnEventQueryStatus {
        h_event: EventHandle,
    }
    EventHostReset, event_host_reset, "zeEventHostReset",
    EventHostResetParams, PfnEventHostReset {
        h_event: EventHandle,
    }

    ModuleCreate, module_create, "zeModuleCreate", ModuleCreateParams, PfnModuleCreate {
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const ModuleDesc,
        ph_module: *mut ModuleHandle,
        ph_build_log: *mut ModuleBuildLogHandle,
    }
    ModuleDestroy, module_destroy, "zeModuleDestroy", ModuleDestroyParams, PfnModuleDestroy {
        h_module: ModuleHandle,
    }
    ModuleBuildLogDestroy, module_build_log_destroy, "zeModuleBuildLogDestroy",
    ModuleBuildLogDestroyParams, PfnModuleBuildLogDestroy {
        h_module_build_log: ModuleBuildLogHandle,
    }
    ModuleBuildLogGetString, module_build_log_get_string, "zeModuleBuildLogGetString",
    ModuleBuildLogGetStringParams, PfnModuleBuildLogGetString {
        h_module_build_log: ModuleBuildLogHandle,
        p_size: *mut usize,
        p_build_log: *mut c_char,
    }
    KernelCreate, kernel_create, "zeKernelCreate", KernelCreateParams, PfnKernelCreate {
        h_module: ModuleHandle,
        desc: *const KernelDesc,
        ph_kernel: *mut KernelHandle,
    }
    KernelDestroy, kernel_destroy, "zeKernelDestroy", KernelDestroyParams, PfnKernelDestroy {
        h_kernel: KernelHandle,
    }
    KernelSetGroupSize, kernel_set_group_size, "zeKernelSetGroupSize",
    KernelSetGroupSizeParams, PfnKernelSetGroupSize {
        h_kernel: KernelHandle,
        group_size_x: u32,
        group_size_y: u32,
        group_size_z: u32,
    }

    MemAllocDevice, mem_alloc_device, "zeMemAllocDevice",
    MemAllocDeviceParams, PfnMemAllocDevice {
        h_context: ContextHandle,
        device_desc: *const DeviceMemAllocDesc,
        size: usize,
        alignment: usize,
        h_device: DeviceHandle,
        pptr: *mut *mut c_void,
    }
    MemAllocHost, mem_alloc_host, "zeMemAllocHost", MemAllocHostParams, PfnMemAllocHost {
        h_context: ContextHandle,
        host_desc: *const HostMemAllocDesc,
        size: usize,
        alignment: usize,
        pptr: *mut *mut c_void,
    }
    MemFree, mem_free, "zeMemFree", MemFreeParams, PfnMemFree {
        h_context: ContextHandle,
        ptr: *mut c_void,
    }

    ImageCreate, image_create, "zeImageCreate", ImageCreateParams, PfnImageCreate {
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const ImageDesc,
        ph_image: *mut ImageHandle,
    }
    ImageDestroy, image_destroy, "zeImageDestroy", ImageDestroyParams, PfnImageDestroy {
        h_image: ImageHandle,
    }
    SamplerCreate, sampler_create, "zeSamplerCreate", SamplerCreateParams, PfnSamplerCreate {
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const SamplerDesc,
        ph_sampler: *mut SamplerHandle,
    }
    SamplerDestroy, sampler_destroy, "zeSamplerDestroy",
    SamplerDestroyParams, PfnSamplerDestroy {
        h_sampler: SamplerHandle,
    }
}
