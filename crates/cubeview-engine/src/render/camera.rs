use glam::{Mat4, Vec3};

use crate::coords::Viewport;

/// Orbit camera and orthographic volume parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    /// Distance from the target on the horizontal plane.
    pub radius: f32,
    /// Fixed eye height.
    pub height: f32,
    /// Width of the view volume in world units.
    pub horizontal_extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: 5.0,
            height: 1.0,
            horizontal_extent: 6.0,
            near: 0.1,
            far: 10.0,
        }
    }
}

/// Matrices and derived values for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTransforms {
    pub eye: Vec3,
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub aspect_ratio: f32,
    pub vertical_extent: f32,
}

impl CameraConfig {
    /// Eye position for `rotation` radians around the vertical axis.
    ///
    /// Any finite angle is accepted; there is no wraparound.
    pub fn eye(&self, rotation: f64) -> Vec3 {
        let (sin, cos) = rotation.sin_cos();
        Vec3::new(
            self.radius * cos as f32,
            self.height,
            self.radius * sin as f32,
        )
    }

    /// Computes model, view and projection for the frame.
    ///
    /// The cube never moves (identity model); rotation is the camera orbiting
    /// the origin. The vertical extent follows the viewport aspect, whose
    /// height is clamped away from zero by [`Viewport::aspect_ratio`].
    pub fn transforms(&self, rotation: f64, viewport: Viewport) -> FrameTransforms {
        let eye = self.eye(rotation);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);

        let aspect_ratio = viewport.aspect_ratio().max(f32::EPSILON);
        let half_w = self.horizontal_extent * 0.5;
        let vertical_extent = self.horizontal_extent / aspect_ratio;
        let half_h = vertical_extent * 0.5;
        let projection =
            Mat4::orthographic_rh_gl(-half_w, half_w, -half_h, half_h, self.near, self.far);

        FrameTransforms {
            eye,
            model: Mat4::IDENTITY,
            view,
            projection,
            aspect_ratio,
            vertical_extent,
        }
    }
}
