#[no_mangle]
pub extern "C" fn wgpu_adapter_get_limits(adapter: id::AdapterId, limits: CExtent3D) {
    let _ = (adapter, limits);
}

#[no_mangle]
pub unsafe extern "C" fn wgpu_device_create_buffer(device_id: id::DeviceId) -> id::BufferId {
    gfx_select!(device_id => GLOBAL.device_create_buffer(device_id, PhantomData))
}
