pub mod device;
pub mod queue;

#[no_mangle]
pub extern "C" fn wgpu_buffer_destroy(buffer: id::BufferId) {
    gfx_select!(buffer => GLOBAL.buffer_destroy(buffer))
}

#[no_mangle]
pub extern "C" fn wgpu_adapter_get_limits(adapter: id::AdapterId, limits: &mut CExtent3D) {
    *limits = gfx_select!(adapter => GLOBAL.adapter_limits(adapter)).into();
}
