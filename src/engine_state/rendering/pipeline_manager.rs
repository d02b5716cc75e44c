//! Owns the cube render pipeline and the GPU buffers it draws from.
//!
//! A frame is a single render pass: clear color and depth, then one instanced
//! draw of the unit cube covering every voxel submitted during the frame.

use log::warn;
use wgpu::{
    util::DeviceExt, Buffer, Device, Queue, RenderPipeline, Surface, SurfaceConfiguration,
    SurfaceError,
};

use crate::error::RenderPreconditionError;

use super::{
    texture::DepthTexture,
    vertex::{CubeInstance, CubeVertex},
};

/// Initial instance buffer capacity, in instances.
const INITIAL_INSTANCE_CAPACITY: usize = 4096;

/// What happened to a frame handed to [`PipelineManager::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// The surface could not provide a texture this frame. When `reconfigure`
    /// is set the surface must be configured again before the next frame.
    Skipped { reconfigure: bool },
}

pub struct PipelineManager {
    render_pipeline: RenderPipeline,
    cube_vertex_buffer: Buffer,
    cube_vertex_count: u32,
    instance_buffer: Buffer,
    instance_capacity: usize,
    depth_texture: DepthTexture,
}

impl PipelineManager {
    /// Creates the pipeline, the unit cube vertex buffer and an initial instance buffer.
    ///
    /// # Arguments
    /// * `device` - The WebGPU device
    /// * `config` - Surface configuration containing size and format
    /// * `shader_source` - WGSL source exposing `vs_main` and `fs_main`
    pub fn new(device: &Device, config: &SurfaceConfiguration, shader_source: &str) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Render Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Cube Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cube Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[CubeVertex::desc(), CubeInstance::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(DepthTexture::depth_stencil_state()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let cube_vertices = CubeVertex::unit_cube();
        let cube_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Unit Cube Vertex Buffer"),
            contents: bytemuck::cast_slice(&cube_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance_buffer = create_instance_buffer(device, INITIAL_INSTANCE_CAPACITY);

        Self {
            render_pipeline,
            cube_vertex_buffer,
            cube_vertex_count: cube_vertices.len() as u32,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            depth_texture: DepthTexture::new(device, config, "DEPTH TEXTURE"),
        }
    }

    /// Renders one frame to `surface`.
    ///
    /// # Errors
    /// A lost surface or an out-of-memory condition is returned as a
    /// [`RenderPreconditionError`]. Timeouts and outdated surfaces skip the
    /// frame instead.
    pub fn render(
        &mut self,
        surface: &Surface,
        device: &Device,
        queue: &Queue,
        clear_color: [f32; 4],
        instances: &[CubeInstance],
    ) -> Result<FrameOutcome, RenderPreconditionError> {
        let frame = match surface.get_current_texture() {
            Ok(frame) => frame,
            Err(SurfaceError::Lost) => return Err(RenderPreconditionError::SurfaceLost),
            Err(SurfaceError::OutOfMemory) => return Err(RenderPreconditionError::OutOfMemory),
            Err(SurfaceError::Outdated) => {
                warn!("Surface outdated, skipping frame");
                return Ok(FrameOutcome::Skipped { reconfigure: true });
            }
            Err(err) => {
                warn!("Error getting current frame: {:?}", err);
                return Ok(FrameOutcome::Skipped { reconfigure: false });
            }
        };

        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(device, self.instance_capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }

        let view = frame.texture.create_view(&Default::default());
        let mut encoder = device.create_command_encoder(&Default::default());
        {
            let [r, g, b, a] = clear_color.map(f64::from);
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cube Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            if !instances.is_empty() {
                let instance_bytes = std::mem::size_of_val(instances) as wgpu::BufferAddress;
                rpass.set_pipeline(&self.render_pipeline);
                rpass.set_vertex_buffer(0, self.cube_vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, self.instance_buffer.slice(..instance_bytes));
                rpass.draw(0..self.cube_vertex_count, 0..instances.len() as u32);
            }
        }

        queue.submit([encoder.finish()]);
        frame.present();

        Ok(FrameOutcome::Presented)
    }

    /// Recreates the depth texture for a new surface size.
    pub fn resize(&mut self, device: &Device, config: &SurfaceConfiguration) {
        self.depth_texture = DepthTexture::new(device, config, "DEPTH TEXTURE");
    }
}

fn create_instance_buffer(device: &Device, capacity: usize) -> Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Cube Instance Buffer"),
        size: (capacity * std::mem::size_of::<CubeInstance>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
