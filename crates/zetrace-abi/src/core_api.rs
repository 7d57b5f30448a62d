//! Traced driver, context, command queue and command list entry points.

use std::ffi::c_void;

use zetrace_core::api::{
    CommandListAppendBarrierParams, CommandListAppendMemoryCopyParams, CommandListCloseParams,
    CommandListCreateParams, CommandListDestroyParams, CommandListResetParams,
    CommandQueueCreateParams, CommandQueueDestroyParams, CommandQueueExecuteCommandListsParams,
    CommandQueueSynchronizeParams, ContextCreateParams, ContextDestroyParams, DriverGetParams,
    InitParams,
};
use zetrace_core::handle::{
    CommandListDesc, CommandListHandle, CommandQueueDesc, CommandQueueHandle, ContextDesc,
    ContextHandle, DeviceHandle, DriverHandle, EventHandle, FenceHandle, InitFlags,
};
use zetrace_core::{DdiTable, ZeResult};

use crate::macros::traced_fns;

traced_fns! {
    fn ze_init_tracing => init, InitParams(flags: InitFlags);
    fn ze_driver_get_tracing => driver_get, DriverGetParams(
        p_count: *mut u32,
        ph_drivers: *mut DriverHandle,
    );

    fn ze_context_create_tracing => context_create, ContextCreateParams(
        h_driver: DriverHandle,
        desc: *const ContextDesc,
        ph_context: *mut ContextHandle,
    );
    fn ze_context_destroy_tracing => context_destroy, ContextDestroyParams(
        h_context: ContextHandle,
    );

    fn ze_command_queue_create_tracing => command_queue_create, CommandQueueCreateParams(
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const CommandQueueDesc,
        ph_command_queue: *mut CommandQueueHandle,
    );
    fn ze_command_queue_destroy_tracing => command_queue_destroy, CommandQueueDestroyParams(
        h_command_queue: CommandQueueHandle,
    );
    fn ze_command_queue_execute_command_lists_tracing => command_queue_execute_command_lists,
        CommandQueueExecuteCommandListsParams(
        h_command_queue: CommandQueueHandle,
        num_command_lists: u32,
        ph_command_lists: *mut CommandListHandle,
        h_fence: FenceHandle,
    );
    fn ze_command_queue_synchronize_tracing => command_queue_synchronize,
        CommandQueueSynchronizeParams(h_command_queue: CommandQueueHandle, timeout: u64);

    fn ze_command_list_create_tracing => command_list_create, CommandListCreateParams(
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const CommandListDesc,
        ph_command_list: *mut CommandListHandle,
    );
    fn ze_command_list_destroy_tracing => command_list_destroy, CommandListDestroyParams(
        h_command_list: CommandListHandle,
    );
    fn ze_command_list_close_tracing => command_list_close, CommandListCloseParams(
        h_command_list: CommandListHandle,
    );
    fn ze_command_list_reset_tracing => command_list_reset, CommandListResetParams(
        h_command_list: CommandListHandle,
    );
    fn ze_command_list_append_barrier_tracing => command_list_append_barrier,
        CommandListAppendBarrierParams(
        h_command_list: CommandListHandle,
        h_signal_event: EventHandle,
        num_wait_events: u32,
        ph_wait_events: *mut EventHandle,
    );
    fn ze_command_list_append_memory_copy_tracing => command_list_append_memory_copy,
        CommandListAppendMemoryCopyParams(
        h_command_list: CommandListHandle,
        dstptr: *mut c_void,
        srcptr: *const c_void,
        size: usize,
        h_signal_event: EventHandle,
        num_wait_events: u32,
        ph_wait_events: *mut EventHandle,
    );
}
