//! Traced image and sampler entry points.

use zetrace_core::api::{
    ImageCreateParams, ImageDestroyParams, SamplerCreateParams, SamplerDestroyParams,
};
use zetrace_core::handle::{
    ContextHandle, DeviceHandle, ImageDesc, ImageHandle, SamplerDesc, SamplerHandle,
};
use zetrace_core::{DdiTable, ZeResult};

use crate::macros::traced_fns;

traced_fns! {
    fn ze_image_create_tracing => image_create, ImageCreateParams(
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const ImageDesc,
        ph_image: *mut ImageHandle,
    );
    fn ze_image_destroy_tracing => image_destroy, ImageDestroyParams(h_image: ImageHandle);

    fn ze_sampler_create_tracing => sampler_create, SamplerCreateParams(
        h_context: ContextHandle,
        h_device: DeviceHandle,
        desc: *const SamplerDesc,
        ph_sampler: *mut SamplerHandle,
    );
    fn ze_sampler_destroy_tracing => sampler_destroy, SamplerDestroyParams(
        h_sampler: SamplerHandle,
    );
}
