//! # Application State Management
//!
//! This module is the host glue around the engine:
//! - Window and graphics initialization
//! - Held-key input handling
//! - Driving one tick per redraw
//! - Writing the HUD into the window title

pub mod graphics_resources_builder;
pub mod input_manager;
pub mod input_state;

use std::sync::Arc;

use graphics_resources_builder::{Graphics, GraphicsBuilder, MaybeGraphics};
use input_manager::InputManager;
use log::{error, info, trace};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{
    config::SandboxConfig,
    engine_state::{voxels::world::VoxelGrid, EngineState},
    error::RenderPreconditionError,
};

/// The main application state container that manages the application's lifecycle.
///
/// It implements `ApplicationHandler` to handle window events and owns the
/// engine once graphics are available.
pub struct ApplicationState {
    /// Graphics initialization progress
    graphics: MaybeGraphics,

    /// The initialized application state, if the application has started
    state: Option<InitializedApplicationState>,

    config: SandboxConfig,

    /// The generated world, until it is handed to the engine
    world: Option<VoxelGrid>,

    /// The error that stopped the event loop, if any
    fatal_error: Option<RenderPreconditionError>,
}

/// Represents the fully initialized and running state of the application.
pub struct InitializedApplicationState {
    /// The core engine state and logic
    pub engine_state: EngineState,

    /// Handle to the application window
    pub window: Arc<Window>,

    /// Held-key map fed by keyboard events
    pub input_manager: InputManager,

    /// When the previous tick started, for frame timing diagnostics
    pub last_frame_time: web_time::Instant,
}

impl ApplicationState {
    /// Creates the application around a world generated before the event loop starts.
    pub fn new(config: SandboxConfig, world: VoxelGrid, proxy: EventLoopProxy<Graphics>) -> Self {
        let builder = GraphicsBuilder::new(proxy, config.window.title.clone());
        Self {
            graphics: MaybeGraphics::Builder(builder),
            state: None,
            config,
            world: Some(world),
            fatal_error: None,
        }
    }

    /// Consumes the application after the event loop has returned.
    ///
    /// # Errors
    /// The render precondition error that stopped the loop, if any.
    pub fn into_result(self) -> Result<(), RenderPreconditionError> {
        match self.fatal_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RenderPreconditionError) {
        error!("Stopping: {}", err);
        self.fatal_error = Some(err);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };

        let now = web_time::Instant::now();
        trace!("Frame time: {:?}", now - state.last_frame_time);
        state.last_frame_time = now;

        let keys = state.input_manager.snapshot();
        match state.engine_state.tick(&keys) {
            Ok(Some(hud)) => state
                .window
                .set_title(&format!("{} | {}", self.config.window.title, hud)),
            Ok(None) => (),
            Err(err) => self.fail(event_loop, err),
        }
    }
}

impl ApplicationHandler<Graphics> for ApplicationState {
    /// Handles window events: resize, focus changes, keyboard input, redraws and exit requests.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(state) = &mut self.state {
            state.input_manager.intake_input(&event);
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(state) = &mut self.state {
                    state.engine_state.resize_surface(size);
                }
            }
            WindowEvent::Focused(false) => {
                if let Some(state) = &mut self.state {
                    state.input_manager.reset_inputs();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            _ => (),
        }
    }

    /// Builds the graphics resources the first time the application is resumed.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let MaybeGraphics::Builder(builder) = &mut self.graphics {
            if let Err(err) = builder.build_and_send(event_loop) {
                self.fail(event_loop, err);
            }
        }
    }

    /// Receives the graphics resources and starts the engine.
    fn user_event(&mut self, _event_loop: &ActiveEventLoop, graphics: Graphics) {
        let Some(world) = self.world.take() else {
            return;
        };

        let engine_state = EngineState::new(
            world,
            &self.config,
            graphics.surface,
            graphics.surface_config,
            graphics.device,
            graphics.queue,
        );

        graphics.window.request_redraw();
        self.state = Some(InitializedApplicationState {
            engine_state,
            window: graphics.window,
            input_manager: InputManager::new(),
            last_frame_time: web_time::Instant::now(),
        });
        self.graphics = MaybeGraphics::Moved;
        info!("Application initialized");
    }

    /// Requests the next redraw; each redraw runs one tick.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.window.request_redraw();
        }
    }
}
