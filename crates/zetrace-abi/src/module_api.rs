//! Traced module, build log and kernel entry points.

use std::ffi::c_char;

use zetrace_core::api::{
    KernelCreateParams, KernelDestroyParams, KernelSetGroupSizeParams, ModuleBuildLogDestroyParams,
    ModuleBuildLogGetStringParams, ModuleCreateParams, ModuleDestroyParams,
};
use zetrace_core::handle::{
    ContextHandle, DeviceHandle, KernelDesc, KernelHandle, ModuleBuildLogHandle, ModuleDesc,
    ModuleHandle,
};
use zetrace_core::{DdiTable, ZeResult};

use crate::macros::traced_fns;

traced_fns! {
    fn ze_module_create_tracing => module_create, ModuleCreateParams(
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const ModuleDesc,
        ph_module: *mut ModuleHandle,
        ph_build_log: *mut ModuleBuildLogHandle,
    );
    fn ze_module_destroy_tracing => module_destroy, ModuleDestroyParams(h_module: ModuleHandle);
    fn ze_module_build_log_destroy_tracing => module_build_log_destroy,
        ModuleBuildLogDestroyParams(h_module_build_log: ModuleBuildLogHandle);
    fn ze_module_build_log_get_string_tracing => module_build_log_get_string,
        ModuleBuildLogGetStringParams(
        h_module_build_log: ModuleBuildLogHandle,
        p_size: *mut usize,
        p_build_log: *mut c_char,
    );

    fn ze_kernel_create_tracing => kernel_create, KernelCreateParams(
        h_module: ModuleHandle,
        desc: *const KernelDesc,
        ph_kernel: *mut KernelHandle,
    );
    fn ze_kernel_destroy_tracing => kernel_destroy, KernelDestroyParams(h_kernel: KernelHandle);
    fn ze_kernel_set_group_size_tracing => kernel_set_group_size, KernelSetGroupSizeParams(
        h_kernel: KernelHandle,
        group_size_x: u32,
        group_size_y: u32,
        group_size_z: u32,
    );
}
