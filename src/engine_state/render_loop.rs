//! # Render Loop
//!
//! One tick of the sandbox: advance the simulation, then draw the world.
//!
//! ## Tick Order
//!
//! 1. Advance the [`FrameClock`] and derive the clear color
//! 2. Begin the frame, clearing to the derived color
//! 3. Apply survival decay
//! 4. Apply movement and vertical physics
//! 5. Compose the view as a translation by the negated player position
//! 6. Issue one unit-cube draw per voxel, translated to the voxel's coordinate
//! 7. End the frame and report HUD values
//!
//! The simulation half is available on its own as [`SimulationState::tick`], a
//! pure `state -> state'` step that tests and the headless harness drive with a
//! fixed sequence of held-key snapshots.
//!
//! The next state is computed up front but only committed once the frame has
//! begun, so a frame that cannot start leaves the loop on the previous tick.
//!
//! Draws go through [`DrawBackend`]. A backend error is fatal: the caller must
//! stop the loop rather than tick again.

use cgmath::{Matrix4, Vector3};

use crate::{
    application_state::input_state::HeldKeys,
    config::{PhysicsConfig, SandboxConfig, SurvivalConfig},
    error::RenderPreconditionError,
};

use super::{
    camera_state::CameraState,
    frame_clock::FrameClock,
    hud::HudReadout,
    player_state::{movement::apply_movement, survival::apply_survival, PlayerState},
    voxels::world::VoxelGrid,
};

/// Everything needed to draw one unit cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub color: [f32; 4],
}

impl DrawCall {
    /// `projection * view * model`
    pub fn model_view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view * self.model
    }
}

/// The rasterization backend: draws unit cubes at a transform with a color.
pub trait DrawBackend {
    /// Starts a frame that is cleared to `clear_color`.
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), RenderPreconditionError>;

    fn draw_unit_cube(&mut self, call: &DrawCall) -> Result<(), RenderPreconditionError>;

    /// Finishes and presents the frame.
    fn end_frame(&mut self) -> Result<(), RenderPreconditionError>;
}

/// A frame captured by [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub clear_color: [f32; 4],
    pub draw_count: usize,
    /// Empty unless the backend retains draws.
    pub draws: Vec<DrawCall>,
}

/// In-memory backend for tests and headless runs.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub frames: Vec<RecordedFrame>,
    retain_draws: bool,
    current: Option<RecordedFrame>,
}

impl RecordingBackend {
    /// Records every draw call of every frame.
    pub fn new() -> Self {
        Self {
            retain_draws: true,
            ..Default::default()
        }
    }

    /// Records clear colors and draw counts only.
    pub fn counting() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl DrawBackend for RecordingBackend {
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> Result<(), RenderPreconditionError> {
        self.current = Some(RecordedFrame {
            clear_color,
            draw_count: 0,
            draws: Vec::new(),
        });
        Ok(())
    }

    fn draw_unit_cube(&mut self, call: &DrawCall) -> Result<(), RenderPreconditionError> {
        let frame = self
            .current
            .as_mut()
            .ok_or(RenderPreconditionError::FrameNotStarted)?;
        frame.draw_count += 1;
        if self.retain_draws {
            frame.draws.push(*call);
        }
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderPreconditionError> {
        let frame = self
            .current
            .take()
            .ok_or(RenderPreconditionError::FrameNotStarted)?;
        self.frames.push(frame);
        Ok(())
    }
}

/// The mutable state threaded through every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub player: PlayerState,
    pub clock: FrameClock,
    pub physics: PhysicsConfig,
    pub survival: SurvivalConfig,
}

impl SimulationState {
    pub fn from_config(config: &SandboxConfig) -> Self {
        Self {
            player: PlayerState::from_config(&config.player),
            clock: FrameClock::new(&config.clock),
            physics: config.physics,
            survival: config.survival,
        }
    }

    /// Returns the state one tick later given the keys held during this tick.
    pub fn tick(&self, keys: &HeldKeys) -> SimulationState {
        let mut next = *self;
        next.clock.advance();
        apply_survival(&mut next.player, &next.survival);
        apply_movement(&mut next.player, keys, &next.physics);
        next
    }

    pub fn hud(&self) -> HudReadout {
        HudReadout::new(&self.player, self.clock.time_of_day())
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::from_config(&SandboxConfig::default())
    }
}

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub draw_calls: usize,
    pub brightness: f64,
    pub hud: HudReadout,
}

/// Owns the world, the simulation state and the camera, and runs ticks against a backend.
pub struct RenderLoop {
    world: VoxelGrid,
    state: SimulationState,
    camera: CameraState,
}

impl RenderLoop {
    pub fn new(world: VoxelGrid, state: SimulationState, camera: CameraState) -> Self {
        Self {
            world,
            state,
            camera,
        }
    }

    /// Builds a loop whose camera starts at the player's spawn point.
    pub fn from_config(world: VoxelGrid, config: &SandboxConfig, width: u32, height: u32) -> Self {
        let state = SimulationState::from_config(config);
        let camera = CameraState::new(state.player.position, width, height, &config.window);
        Self::new(world, state, camera)
    }

    pub fn world(&self) -> &VoxelGrid {
        &self.world
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    /// Keeps the projection in step with the render surface.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Runs one tick.
    ///
    /// # Errors
    /// Returns the backend's error unchanged. The loop must not be ticked again
    /// after an error.
    pub fn tick<B: DrawBackend + ?Sized>(
        &mut self,
        keys: &HeldKeys,
        backend: &mut B,
    ) -> Result<TickReport, RenderPreconditionError> {
        let next = self.state.tick(keys);
        backend.begin_frame(next.clock.clear_color())?;
        self.state = next;

        self.camera.follow(self.state.player.position);
        let view = self.camera.view_matrix();
        let projection = self.camera.projection_matrix();

        let mut draw_calls = 0;
        for (position, material) in self.world.iter() {
            let model = Matrix4::from_translation(Vector3::new(
                position.x as f32,
                position.y as f32,
                position.z as f32,
            ));
            backend.draw_unit_cube(&DrawCall {
                model,
                view,
                projection,
                color: material.color(),
            })?;
            draw_calls += 1;
        }

        backend.end_frame()?;

        let report = TickReport {
            tick: self.state.clock.ticks(),
            draw_calls,
            brightness: self.state.clock.brightness(),
            hud: self.state.hud(),
        };
        log::trace!(
            "tick {} drew {} cubes, player at {:?}",
            report.tick,
            report.draw_calls,
            self.state.player.position
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use cgmath::{Point3, SquareMatrix, Vector4};

    use super::*;
    use crate::{
        application_state::input_state::SandboxKey,
        config::HeightProfile,
        engine_state::{
            frame_clock::TimeOfDay,
            voxels::{block::block_type::Material, generation::WorldGenerator},
        },
    };

    fn small_loop() -> RenderLoop {
        let world = WorldGenerator::new(4, 4, 2)
            .generate(HeightProfile::Fixed { height: 2 })
            .unwrap();
        RenderLoop::from_config(world, &SandboxConfig::default(), 800, 600)
    }

    struct FailingBackend {
        fail_on_begin: bool,
        fail_after: usize,
        draws: usize,
    }

    impl DrawBackend for FailingBackend {
        fn begin_frame(&mut self, _: [f32; 4]) -> Result<(), RenderPreconditionError> {
            if self.fail_on_begin {
                return Err(RenderPreconditionError::SurfaceLost);
            }
            Ok(())
        }

        fn draw_unit_cube(&mut self, _: &DrawCall) -> Result<(), RenderPreconditionError> {
            if self.draws == self.fail_after {
                return Err(RenderPreconditionError::SurfaceLost);
            }
            self.draws += 1;
            Ok(())
        }

        fn end_frame(&mut self) -> Result<(), RenderPreconditionError> {
            Ok(())
        }
    }

    #[test]
    fn one_draw_per_voxel_translated_to_its_coordinate() {
        let mut render_loop = small_loop();
        let mut backend = RecordingBackend::new();
        let report = render_loop.tick(&HeldKeys::new(), &mut backend).unwrap();

        assert_eq!(report.draw_calls, 32);
        let frame = backend.last_frame().unwrap();
        assert_eq!(frame.draw_count, 32);

        let drawn: HashSet<(i32, i32, i32)> = frame
            .draws
            .iter()
            .map(|call| {
                let origin = call.model * Vector4::new(0.0, 0.0, 0.0, 1.0);
                (origin.x as i32, origin.y as i32, origin.z as i32)
            })
            .collect();
        let expected: HashSet<(i32, i32, i32)> = render_loop
            .world()
            .iter()
            .map(|(p, _)| (p.x, p.y, p.z))
            .collect();
        assert_eq!(drawn, expected);

        for call in &frame.draws {
            assert_eq!(call.color, Material::Sand.color());
        }
    }

    #[test]
    fn view_is_negated_player_translation() {
        let mut render_loop = small_loop();
        let mut backend = RecordingBackend::new();
        render_loop
            .tick(&HeldKeys::holding(&[SandboxKey::Right]), &mut backend)
            .unwrap();

        let player = render_loop.state().player.position;
        let frame = backend.last_frame().unwrap();
        for call in &frame.draws {
            let eye = call.view * Vector4::new(player.x, player.y, player.z, 1.0);
            assert!(eye.x.abs() < 1e-5 && eye.y.abs() < 1e-5 && eye.z.abs() < 1e-5);
            assert_eq!(call.projection, render_loop.camera().projection_matrix());
            assert!(call.model_view_projection().invert().is_some());
        }
    }

    #[test]
    fn clear_color_follows_clock() {
        let mut render_loop = small_loop();
        let mut backend = RecordingBackend::counting();
        for _ in 0..3 {
            render_loop.tick(&HeldKeys::new(), &mut backend).unwrap();
        }
        assert_eq!(backend.frames.len(), 3);
        let b = ((3.0f64 * 0.01).sin() * 0.5 + 0.5) as f32;
        assert_eq!(backend.frames[2].clear_color, [0.1 * b, 0.2 * b, 0.4 * b, 1.0]);
        assert!(backend.frames[2].draws.is_empty());
        assert_eq!(backend.frames[2].draw_count, 32);
    }

    #[test]
    fn report_carries_hud_values() {
        let mut render_loop = small_loop();
        let mut backend = RecordingBackend::counting();
        let report = render_loop.tick(&HeldKeys::new(), &mut backend).unwrap();
        assert_eq!(report.tick, 1);
        assert_eq!(report.hud.health, 100);
        assert_eq!(report.hud.hunger, 99);
        assert_eq!(report.hud.time_of_day, TimeOfDay::Day);
        assert!(!report.hud.defeated);
    }

    #[test]
    fn backend_error_is_returned() {
        let mut render_loop = small_loop();
        let mut backend = FailingBackend {
            fail_on_begin: false,
            fail_after: 5,
            draws: 0,
        };
        let err = render_loop.tick(&HeldKeys::new(), &mut backend).unwrap_err();
        assert_eq!(err, RenderPreconditionError::SurfaceLost);
    }

    #[test]
    fn frame_that_cannot_begin_leaves_state_untouched() {
        let mut render_loop = small_loop();
        let before = *render_loop.state();
        let mut backend = FailingBackend {
            fail_on_begin: true,
            fail_after: usize::MAX,
            draws: 0,
        };
        let err = render_loop
            .tick(&HeldKeys::holding(&[SandboxKey::Forward]), &mut backend)
            .unwrap_err();
        assert_eq!(err, RenderPreconditionError::SurfaceLost);
        assert_eq!(*render_loop.state(), before);
        assert_eq!(render_loop.state().clock.ticks(), 0);
        assert_eq!(backend.draws, 0);
    }

    #[test]
    fn drawing_outside_a_frame_is_rejected() {
        let mut backend = RecordingBackend::new();
        let call = DrawCall {
            model: Matrix4::identity(),
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
            color: [1.0; 4],
        };
        assert_eq!(
            backend.draw_unit_cube(&call),
            Err(RenderPreconditionError::FrameNotStarted)
        );
        assert_eq!(backend.end_frame(), Err(RenderPreconditionError::FrameNotStarted));
    }

    #[test]
    fn simulation_tick_is_pure() {
        let state = SimulationState {
            player: PlayerState::new(Point3::new(16.0, 5.0, 16.0), 100.0, 100.0),
            ..SimulationState::default()
        };
        let keys = HeldKeys::holding(&[SandboxKey::Forward]);
        let a = state.tick(&keys);
        let b = state.tick(&keys);
        assert_eq!(a, b);
        assert_eq!(state.clock.ticks(), 0);
        assert_eq!(a.clock.ticks(), 1);
        assert!(a.player.position.z < 16.0);
        assert!((a.player.position.y - 4.99).abs() < 1e-5);
    }
}
