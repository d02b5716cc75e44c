#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Sandbox
//!
//! A small voxel sandbox built with Rust and WGPU: a procedurally generated
//! block world drawn one unit cube per voxel, with a player that walks,
//! falls, levitates on jump, gets hungry and can starve, under a sky that
//! cycles between day and night.
//!
//! ## Key Modules
//!
//! * `engine_state` - World generation, simulation and rendering
//! * `application_state` - Window, input and the winit event loop
//! * `config` - JSON configuration with defaults
//! * `error` - Error types
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//!
//! fn main() -> Result<(), voxel_sandbox::error::SandboxError> {
//!     voxel_sandbox::run(voxel_sandbox::cli::Cli::parse())
//! }
//! ```
//!
//! Passing `--headless <ticks>` runs the same loop against an in-memory
//! backend without opening a window.

use application_state::{input_state::HeldKeys, ApplicationState};
use cgmath::Point3;
use config::SandboxConfig;
use engine_state::{
    hud::HudReadout,
    render_loop::{RecordingBackend, RenderLoop},
    voxels::{generation::WorldGenerator, world::VoxelGrid},
};
use error::{GenerationError, RenderPreconditionError, SandboxError};
use log::info;
use winit::event_loop::EventLoop;

pub mod application_state;
pub mod cli;
pub mod config;
pub mod engine_state;
pub mod error;

/// Surface size assumed by the headless harness.
const HEADLESS_SURFACE: (u32, u32) = (800, 600);

/// Outcome of a headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessSummary {
    pub ticks: u64,
    pub voxels: usize,
    pub draw_calls: usize,
    pub final_position: Point3<f32>,
    pub hud: Option<HudReadout>,
}

/// Generates the world described by `config`.
///
/// # Errors
/// Any [`GenerationError`]; generation runs before the frame loop starts.
pub fn generate_world(config: &SandboxConfig) -> Result<VoxelGrid, GenerationError> {
    WorldGenerator::from_config(&config.world).generate(config.world.height)
}

/// Runs `ticks` ticks with no keys held against a [`RecordingBackend`].
///
/// # Errors
/// The first [`RenderPreconditionError`] stops the run.
pub fn run_headless(
    world: VoxelGrid,
    config: &SandboxConfig,
    ticks: u64,
) -> Result<HeadlessSummary, RenderPreconditionError> {
    let (width, height) = HEADLESS_SURFACE;
    let mut render_loop = RenderLoop::from_config(world, config, width, height);
    let mut backend = RecordingBackend::counting();
    let keys = HeldKeys::new();

    let mut summary = HeadlessSummary {
        ticks: 0,
        voxels: render_loop.world().len(),
        draw_calls: 0,
        final_position: render_loop.state().player.position,
        hud: None,
    };

    for _ in 0..ticks {
        let report = render_loop.tick(&keys, &mut backend)?;
        if summary.hud.is_some_and(|hud| hud.time_of_day != report.hud.time_of_day) {
            info!("Tick {}: {}", report.tick, report.hud.time_of_day);
        }
        summary.ticks = report.tick;
        summary.draw_calls += report.draw_calls;
        summary.hud = Some(report.hud);
        backend.frames.clear();
    }
    summary.final_position = render_loop.state().player.position;

    Ok(summary)
}

/// Initializes logging, loads configuration, generates the world and runs
/// either the windowed event loop or the headless harness.
///
/// # Errors
/// Configuration, generation, event loop and fatal render errors.
pub fn run(cli: cli::Cli) -> Result<(), SandboxError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let mut config = SandboxConfig::load_or_default(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    let world = generate_world(&config)?;

    if let Some(ticks) = cli.headless {
        let summary = run_headless(world, &config, ticks)?;
        info!(
            "Headless run: {} ticks, {} voxels, {} draw calls, player at {:?}",
            summary.ticks, summary.voxels, summary.draw_calls, summary.final_position
        );
        if let Some(hud) = summary.hud {
            info!("{}", hud);
        }
        return Ok(());
    }

    let event_loop = EventLoop::with_user_event().build()?;
    let mut state = ApplicationState::new(config, world, event_loop.create_proxy());
    event_loop.run_app(&mut state)?;

    Ok(state.into_result()?)
}
