//! Traced event pool and event entry points.

use zetrace_core::api::{
    EventCreateParams, EventDestroyParams, EventHostResetParams, EventHostSignalParams,
    EventHostSynchronizeParams, EventPoolCreateParams, EventPoolDestroyParams,
    EventQueryStatusParams,
};
use zetrace_core::handle::{
    ContextHandle, DeviceHandle, EventDesc, EventHandle, EventPoolDesc, EventPoolHandle,
};
use zetrace_core::{DdiTable, ZeResult};

use crate::macros::traced_fns;

traced_fns! {
    fn ze_event_pool_create_tracing => event_pool_create, EventPoolCreateParams(
        h_context: ContextHandle,
        desc: *const EventPoolDesc,
        num_devices: u32,
        ph_devices: *mut DeviceHandle,
        ph_event_pool: *mut EventPoolHandle,
    );
    fn ze_event_pool_destroy_tracing => event_pool_destroy, EventPoolDestroyParams(
        h_event_pool: EventPoolHandle,
    );

    fn ze_event_create_tracing => event_create, EventCreateParams(
        h_event_pool: EventPoolHandle,
        desc: *const EventDesc,
        ph_event: *mut EventHandle,
    );
    fn ze_event_destroy_tracing => event_destroy, EventDestroyParams(h_event: EventHandle);
    fn ze_event_host_signal_tracing => event_host_signal, EventHostSignalParams(
        h_event: EventHandle,
    );
    fn ze_event_host_synchronize_tracing => event_host_synchronize, EventHostSynchronizeParams(
        h_event: EventHandle,
        timeout: u64,
    );
    fn ze_event_query_status_tracing => event_query_status, EventQueryStatusParams(
        h_event: EventHandle,
    );
    fn ze_event_host_reset_tracing => event_host_reset, EventHostResetParams(
        h_event: EventHandle,
    );
}
