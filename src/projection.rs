//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the camera's
//! perspective parameters (FOV, aspect ratio, near/far planes). The core
//! consumes only the combined view-projection matrix; this type is the
//! convenience for collaborators that build it each frame.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// Returns the vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Returns the aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Returns the near clipping plane distance.
    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    /// Returns the far clipping plane distance.
    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Generates the left-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// Combined view-projection matrix for a camera at `eye` looking at
    /// `target`. This is the transform [`crate::render::Renderer::draw_triangle`]
    /// expects once per frame.
    pub fn view_projection(&self, eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        self.matrix() * Mat4::look_at_lh(eye, target, up)
    }
}
