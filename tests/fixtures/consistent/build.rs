fn main() {
    let bindings = bindgen::Builder::default()
        .header("ffi/webgpu-headers/webgpu.h")
        .raw_line(OVERRIDES)
        .generate()
        .expect("Unable to generate bindings");
    bindings.write_to_file("bindings.rs").unwrap();
}

const OVERRIDES: &str = r#"
#[repr(C)]
pub struct WGPUExtent3D {
    pub width: u32,
    pub height: u32,
    pub depth_or_array_layers: u32,
}

#[repr(C)]
pub struct WGPUBufferDescriptor {
    pub next_in_chain: *const WGPUChainedStruct,
    pub label: *const c_char,
    pub usage: u64,
    pub size: u64,
    pub mapped_at_creation: u32,
}
"#;
