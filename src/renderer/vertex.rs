//! Vertex types handed to the host renderer

use bytemuck::{Pod, Zeroable};

/// Displaced surface vertex with interpolated color and alpha
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl SurfaceVertex {
    pub const fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

/// Byte view of a vertex buffer, ready for GPU upload by the host.
pub fn vertex_bytes(vertices: &[SurfaceVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
