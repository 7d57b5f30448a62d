//! Traced memory allocation and residency entry points.

use std::ffi::c_void;

use zetrace_core::api::{
    ContextEvictMemoryParams, ContextMakeMemoryResidentParams, MemAllocDeviceParams,
    MemAllocHostParams, MemFreeParams,
};
use zetrace_core::handle::{ContextHandle, DeviceHandle, DeviceMemAllocDesc, HostMemAllocDesc};
use zetrace_core::{DdiTable, ZeResult};

use crate::macros::traced_fns;

traced_fns! {
    fn ze_mem_alloc_device_tracing => mem_alloc_device, MemAllocDeviceParams(
        h_context: ContextHandle,
        device_desc: *const DeviceMemAllocDesc,
        size: usize,
        alignment: usize,
        h_device: DeviceHandle,
        pptr: *mut *mut c_void,
    );
    fn ze_mem_alloc_host_tracing => mem_alloc_host, MemAllocHostParams(
        h_context: ContextHandle,
        host_desc: *const HostMemAllocDesc,
        size: usize,
        alignment: usize,
        pptr: *mut *mut c_void,
    );
    fn ze_mem_free_tracing => mem_free, MemFreeParams(h_context: ContextHandle, ptr: *mut c_void);

    fn ze_context_make_memory_resident_tracing => context_make_memory_resident,
        ContextMakeMemoryResidentParams(
        h_context: ContextHandle,
        h_device: DeviceHandle,
        ptr: *mut c_void,
        size: usize,
    );
    fn ze_context_evict_memory_tracing => context_evict_memory, ContextEvictMemoryParams(
        h_context: ContextHandle,
        h_device: DeviceHandle,
        ptr: *mut c_void,
        size: usize,
    );
}
