//! # Errors
//!
//! Error types shared across the sandbox. Generation and configuration errors
//! are raised before the frame loop starts; render precondition errors are
//! fatal and stop the loop.

use thiserror::Error;

/// Raised by the world generator when the requested extent cannot produce a world.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    /// Width or depth was zero or negative.
    #[error("invalid world extent {width}x{depth}: width and depth must be positive")]
    InvalidExtent { width: i32, depth: i32 },

    /// The maximum column height was zero.
    #[error("maximum column height must be at least 1")]
    InvalidMaxHeight,

    /// A height function produced a column outside `[1, max_height]`.
    #[error("column ({x}, {z}) has height {height}, expected 1..={max_height}")]
    ColumnHeightOutOfRange {
        x: i32,
        z: i32,
        height: u32,
        max_height: u32,
    },
}

/// The draw primitive cannot be used. The frame loop stops when it sees one of these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderPreconditionError {
    #[error("failed to create window: {0}")]
    WindowCreation(String),

    #[error("failed to create render surface: {0}")]
    SurfaceCreation(String),

    #[error("no compatible graphics adapter is available")]
    AdapterUnavailable,

    #[error("graphics device request failed: {0}")]
    DeviceRequest(String),

    #[error("render surface was lost")]
    SurfaceLost,

    #[error("graphics backend ran out of memory")]
    OutOfMemory,

    /// A draw was issued outside of `begin_frame`/`end_frame`.
    #[error("draw issued before the frame was started")]
    FrameNotStarted,
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Top level error returned by [`crate::run`].
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Render(#[from] RenderPreconditionError),

    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}
