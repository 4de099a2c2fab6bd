//! Perspective camera shared by every scene.
//!
//! The camera avoids platform-specific APIs; renderers only consume the
//! combined view-projection matrix.

use crate::config::CameraConfig;
use crate::pointer::PointerState;
use glam::{Mat4, Vec2, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    base_eye: Vec3,
    parallax: Vec2,
}

impl Camera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: config.position,
            target: config.target,
            up: Vec3::Y,
            aspect,
            fovy_radians: config.fov_y_degrees.to_radians(),
            znear: config.near,
            zfar: config.far,
            base_eye: config.position,
            parallax: config.parallax,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Shift the eye in its own plane; the camera keeps facing the same
    /// direction rather than re-aiming at the target.
    pub fn follow_pointer(&mut self, pointer: PointerState) {
        let offset = pointer.as_vec2() * self.parallax;
        let shift = Vec3::new(offset.x, offset.y, 0.0);
        let forward = self.target - self.eye;
        self.eye = self.base_eye + shift;
        self.target = self.eye + forward;
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }
}
