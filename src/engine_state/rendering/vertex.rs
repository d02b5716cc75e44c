//! Vertex and instance layouts for cube rendering.
//!
//! Every voxel is drawn from the same unit-cube vertex buffer. Per-voxel data
//! (the composed model-view-projection matrix and the draw color) travels in a
//! second, per-instance vertex buffer.

use crate::engine_state::render_loop::DrawCall;

/// A corner of the unit cube spanning `[0, 1]` on every axis.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    position: [f32; 3],
}

/// Cube faces, each listed counter-clockwise as seen from outside.
const CUBE_FACES: [[[f32; 3]; 4]; 6] = [
    // +X
    [[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
    // -X
    [[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
    // +Y
    [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
    // -Y
    [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
    // +Z
    [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
    // -Z
    [[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
];

impl CubeVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    /// Triangle list for the unit cube: two triangles per face, 36 vertices.
    pub fn unit_cube() -> Vec<CubeVertex> {
        CUBE_FACES
            .iter()
            .flat_map(|face| [face[0], face[1], face[2], face[0], face[2], face[3]])
            .map(|position| CubeVertex { position })
            .collect()
    }

    /// # Shader Attributes
    /// - `location = 0`: position (vec3<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Per-voxel instance data.
///
/// # Memory Layout
/// - Model-view-projection: 4x4 f32, column major (64 bytes)
/// - Color: RGBA f32 (16 bytes)
///
/// Total size: 80 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeInstance {
    model_view_projection: [[f32; 4]; 4],
    color: [f32; 4],
}

impl CubeInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x4,
        2 => Float32x4,
        3 => Float32x4,
        4 => Float32x4,
        5 => Float32x4
    ];

    /// # Shader Attributes
    /// - `location = 1..=4`: matrix columns (vec4<f32>)
    /// - `location = 5`: color (vec4<f32>)
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<&DrawCall> for CubeInstance {
    fn from(call: &DrawCall) -> Self {
        Self {
            model_view_projection: call.model_view_projection().into(),
            color: call.color,
        }
    }
}
