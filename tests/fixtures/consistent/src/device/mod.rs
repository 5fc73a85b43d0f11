use crate::GLOBAL;

#[no_mangle]
pub unsafe extern "C" fn wgpu_device_create_buffer(
    device_id: id::DeviceId,
    descriptor: &wgt::BufferDescriptor<Label>,
) -> id::BufferId {
    gfx_select!(device_id => GLOBAL.device_create_buffer(device_id, descriptor, PhantomData))
}
