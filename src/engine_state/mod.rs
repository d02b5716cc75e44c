//! # Engine State Module
//!
//! The simulation and rendering core of the sandbox.
//!
//! ## Key Components
//!
//! * `voxels` - Voxel storage, materials and world generation
//! * `player_state` - Player transform, movement physics and survival decay
//! * `camera_state` - View and projection transforms
//! * `frame_clock` - Time accumulator driving the day/night signal
//! * `render_loop` - The per-tick update and draw traversal
//! * `rendering` - wgpu implementation of the draw backend
//! * `hud` - Per-tick values for the display sink
//!
//! `EngineState` pairs a [`RenderLoop`] with the windowed [`CubeRenderer`]. The
//! headless harness drives a `RenderLoop` directly with a recording backend.

use log::info;
use wgpu::{Device, Queue, Surface, SurfaceConfiguration};

use crate::{
    application_state::input_state::HeldKeys, config::SandboxConfig,
    error::RenderPreconditionError,
};

use hud::HudReadout;
use render_loop::RenderLoop;
use rendering::CubeRenderer;
use voxels::world::VoxelGrid;

pub mod camera_state;
pub mod frame_clock;
pub mod hud;
pub mod player_state;
pub mod render_loop;
pub mod rendering;
pub mod voxels;

/// The running sandbox: world, simulation state and the GPU renderer.
pub struct EngineState {
    render_loop: RenderLoop,
    renderer: CubeRenderer,
    /// HUD from the previous tick, to report only changes
    last_hud: Option<HudReadout>,
}

impl EngineState {
    /// Creates the engine state around a generated world.
    ///
    /// # Arguments
    ///
    /// * `world` - The generated voxel world
    /// * `config` - Sandbox configuration (player, physics, clock, window)
    /// * `surface` - The rendering surface
    /// * `surface_config` - Configuration for the rendering surface
    /// * `device` - The GPU device
    /// * `queue` - The GPU command queue
    pub fn new(
        world: VoxelGrid,
        config: &SandboxConfig,
        surface: Surface<'static>,
        surface_config: SurfaceConfiguration,
        device: Device,
        queue: Queue,
    ) -> Self {
        let render_loop = RenderLoop::from_config(
            world,
            config,
            surface_config.width,
            surface_config.height,
        );
        let renderer = CubeRenderer::new(surface, surface_config, device, queue);

        info!(
            "Engine ready: {} voxels, player at {:?}",
            render_loop.world().len(),
            render_loop.state().player.position
        );

        Self {
            render_loop,
            renderer,
            last_hud: None,
        }
    }

    /// Resizes the rendering surface and projection when the window size changes.
    pub fn resize_surface(&mut self, size: winit::dpi::PhysicalSize<u32>) {
        self.renderer.resize_surface(size);
        if size.width > 0 && size.height > 0 {
            self.render_loop.resize(size.width, size.height);
        }
    }

    /// Runs one tick and draws it.
    ///
    /// # Returns
    ///
    /// The HUD readout when it differs from the previous tick's, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Any [`RenderPreconditionError`] is fatal; the caller must stop ticking.
    pub fn tick(&mut self, keys: &HeldKeys) -> Result<Option<HudReadout>, RenderPreconditionError> {
        let report = self.render_loop.tick(keys, &mut self.renderer)?;

        if self.last_hud == Some(report.hud) {
            return Ok(None);
        }
        self.last_hud = Some(report.hud);
        Ok(Some(report.hud))
    }
}
