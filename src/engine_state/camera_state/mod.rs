//! # Camera State Management
//!
//! The camera is glued to the player: every tick it is moved to the player's
//! position and the view transform is rebuilt as a translation by the negated
//! position. The projection is kept in sync with the surface size.

use camera::{Camera, Projection};
use cgmath::{Deg, Matrix4, Point3};

use crate::config::WindowConfig;

pub mod camera;

/// Camera and projection used to compose every draw call of a frame.
#[derive(Debug, Clone, Copy)]
pub struct CameraState {
    /// The current camera position
    pub camera: Camera,
    /// Perspective projection for the current surface size
    pub projection: Projection,
}

impl CameraState {
    /// Creates a camera at `position` with a projection for a `width` x `height` surface.
    pub fn new(position: Point3<f32>, width: u32, height: u32, window: &WindowConfig) -> Self {
        Self {
            camera: Camera::new(position),
            projection: Projection::new(
                width,
                height,
                Deg(window.fov_degrees),
                window.znear,
                window.zfar,
            ),
        }
    }

    /// Moves the camera to follow the player.
    pub fn follow(&mut self, position: Point3<f32>) {
        self.camera.position = position;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.camera.calc_matrix()
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection.calc_matrix()
    }
}
