//! Traced fence entry points.

use zetrace_core::api::{
    FenceCreateParams, FenceDestroyParams, FenceHostSynchronizeParams, FenceQueryStatusParams,
    FenceResetParams,
};
use zetrace_core::handle::{CommandQueueHandle, FenceDesc, FenceHandle};
use zetrace_core::{DdiTable, ZeResult};

use crate::macros::traced_fns;

traced_fns! {
    fn ze_fence_create_tracing => fence_create, FenceCreateParams(
        h_command_queue: CommandQueueHandle,
        desc: *const FenceDesc,
        ph_fence: *mut FenceHandle,
    );
    fn ze_fence_destroy_tracing => fence_destroy, FenceDestroyParams(h_fence: FenceHandle);
    fn ze_fence_host_synchronize_tracing => fence_host_synchronize, FenceHostSynchronizeParams(
        h_fence: FenceHandle,
        timeout: u64,
    );
    fn ze_fence_query_status_tracing => fence_query_status, FenceQueryStatusParams(
        h_fence: FenceHandle,
    );
    fn ze_fence_reset_tracing => fence_reset, FenceResetParams(h_fence: FenceHandle);
}
