//! Rendering system for the voxel sandbox.
//!
//! [`CubeRenderer`] is the wgpu implementation of [`DrawBackend`]. Draw calls
//! issued between `begin_frame` and `end_frame` are collected as instances and
//! submitted together as one instanced draw when the frame ends.

use log::debug;
use pipeline_manager::{FrameOutcome, PipelineManager};
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use crate::error::RenderPreconditionError;

use super::render_loop::{DrawBackend, DrawCall};

mod pipeline_manager;
mod texture;
mod vertex;

pub use vertex::{CubeInstance, CubeVertex};

/// WGSL source for the cube pipeline.
pub const CUBE_SHADER: &str = include_str!("../../../assets/shaders/cube.wgsl");

/// Draws unit cubes to a window surface.
pub struct CubeRenderer {
    /// The WebGPU surface being rendered to
    surface: Surface<'static>,
    /// Configuration for the surface (size, format, etc.)
    surface_config: SurfaceConfiguration,
    device: Device,
    queue: Queue,
    pipeline_manager: PipelineManager,
    /// Clear color of the frame in progress, `None` outside a frame
    clear_color: Option<[f32; 4]>,
    instances: Vec<CubeInstance>,
}

impl CubeRenderer {
    /// Creates a renderer for an already configured surface.
    ///
    /// # Arguments
    /// * `surface` - The WebGPU surface to render to
    /// * `surface_config` - Configuration the surface was configured with
    /// * `device` - The WebGPU device
    /// * `queue` - The WebGPU queue for submitting command buffers
    pub fn new(
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
    ) -> Self {
        let pipeline_manager = PipelineManager::new(&device, &surface_config, CUBE_SHADER);

        Self {
            surface,
            surface_config,
            device,
            queue,
            pipeline_manager,
            clear_color: None,
            instances: Vec::new(),
        }
    }

    /// Reconfigures the surface and depth buffer for a new window size.
    ///
    /// Zero-sized windows (minimized) are ignored.
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.pipeline_manager.resize(&self.device, &self.surface_config);
    }
}

impl DrawBackend for CubeRenderer {
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), RenderPreconditionError> {
        self.clear_color = Some(clear_color);
        self.instances.clear();
        Ok(())
    }

    fn draw_unit_cube(&mut self, call: &DrawCall) -> Result<(), RenderPreconditionError> {
        if self.clear_color.is_none() {
            return Err(RenderPreconditionError::FrameNotStarted);
        }
        self.instances.push(CubeInstance::from(call));
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderPreconditionError> {
        let clear_color = self
            .clear_color
            .take()
            .ok_or(RenderPreconditionError::FrameNotStarted)?;

        let outcome = self.pipeline_manager.render(
            &self.surface,
            &self.device,
            &self.queue,
            clear_color,
            &self.instances,
        )?;

        if outcome == (FrameOutcome::Skipped { reconfigure: true }) {
            debug!("Reconfiguring surface");
            self.surface.configure(&self.device, &self.surface_config);
        }
        Ok(())
    }
}
