//! # Graphics Resources Builder
//!
//! Creates the window and the WebGPU context the renderer needs.
//!
//! The main components are:
//! - `Graphics`: Holds all graphics-related resources
//! - `GraphicsBuilder`: Helper for graphics initialization
//! - `MaybeGraphics`: Represents the various states of graphics initialization

use std::future::Future;
use std::sync::Arc;

use log::{info, warn};
use wgpu::{Adapter, Device, Instance, Queue, Surface, SurfaceConfiguration};
use winit::{
    event_loop::{ActiveEventLoop, EventLoopProxy},
    window::Window,
};

use crate::error::RenderPreconditionError;

/// Contains all graphics-related resources required by the application.
#[allow(dead_code)]
pub struct Graphics {
    pub window: Arc<Window>,
    pub instance: Instance,
    pub surface: Surface<'static>,
    pub surface_config: SurfaceConfiguration,
    pub adapter: Adapter,
    pub device: Device,
    pub queue: Queue,
}

/// Creates the window and surface, then returns a future that requests the
/// adapter and device and configures the surface.
///
/// # Arguments
/// * `event_loop` - The active event loop used to create the window and surface
/// * `title` - Initial window title
///
/// # Errors
/// Window or surface creation failures are returned immediately; adapter and
/// device failures are returned by the future.
fn create_graphics(
    event_loop: &ActiveEventLoop,
    title: &str,
) -> Result<impl Future<Output = Result<Graphics, RenderPreconditionError>> + 'static, RenderPreconditionError>
{
    let window_attrs = Window::default_attributes().with_title(title);

    let window = Arc::new(
        event_loop
            .create_window(window_attrs)
            .map_err(|err| RenderPreconditionError::WindowCreation(err.to_string()))?,
    );

    // Backends::PRIMARY => Vulkan + Metal + DX12 + Browser WebGPU
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        flags: wgpu::InstanceFlags::empty(),
        backend_options: wgpu::BackendOptions::from_env_or_default(),
    });

    let surface = instance
        .create_surface(window.clone())
        .map_err(|err| RenderPreconditionError::SurfaceCreation(err.to_string()))?;

    Ok(async move {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|_| RenderPreconditionError::AdapterUnavailable)?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                label: None,
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|err| RenderPreconditionError::DeviceRequest(err.to_string()))?;

        let size = window.inner_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| {
                RenderPreconditionError::SurfaceCreation(
                    "surface reports no supported formats".to_string(),
                )
            })?;
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);

        info!(
            "Graphics ready: {} ({:?}), surface {}x{} {:?}",
            adapter.get_info().name,
            adapter.get_info().backend,
            surface_config.width,
            surface_config.height,
            surface_config.format
        );

        Ok(Graphics {
            window,
            instance,
            surface,
            surface_config,
            adapter,
            device,
            queue,
        })
    })
}

/// Helper struct for initializing graphics resources and handing them back to
/// the event loop as a user event.
pub struct GraphicsBuilder {
    event_loop_proxy: Option<EventLoopProxy<Graphics>>,
    window_title: String,
}

/// Represents the possible states of the graphics initialization process.
pub enum MaybeGraphics {
    /// Waiting for the event loop to resume
    Builder(GraphicsBuilder),

    /// State after graphics resources have been moved into the engine
    Moved,
}

impl GraphicsBuilder {
    /// Creates a new GraphicsBuilder with the specified event loop proxy.
    ///
    /// # Arguments
    /// * `event_loop_proxy` - Used to send the initialized graphics resources back to the main thread
    /// * `window_title` - Title of the window to create
    pub fn new(event_loop_proxy: EventLoopProxy<Graphics>, window_title: impl Into<String>) -> Self {
        Self {
            event_loop_proxy: Some(event_loop_proxy),
            window_title: window_title.into(),
        }
    }

    /// Builds the graphics resources and sends them to the event loop.
    ///
    /// Does nothing once the resources have already been built.
    ///
    /// # Errors
    /// Any failure creating the window, surface, adapter or device.
    pub fn build_and_send(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderPreconditionError> {
        let Some(event_loop_proxy) = self.event_loop_proxy.take() else {
            // event_loop_proxy is already spent - we already constructed Graphics
            return Ok(());
        };

        let gfx = pollster::block_on(create_graphics(event_loop, &self.window_title)?)?;
        if event_loop_proxy.send_event(gfx).is_err() {
            warn!("Event loop closed before graphics were delivered");
        }
        Ok(())
    }
}
