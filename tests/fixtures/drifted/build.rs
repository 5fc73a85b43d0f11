const OVERRIDES: &str = r#"
#[repr(C)]
pub struct WGPUExtent3D {
    pub width: u32,
    pub depth: u32,
    pub depth_or_array_layers: u32,
}

#[repr(C)]
pub struct WGPUColorValue {
    pub r: f64,
    pub a: f64,
}
"#;
