//! Camera rig: a grouping node that carries the perspective camera.
//!
//! Parallax moves the rig (`group_position`); scroll moves the camera inside
//! the rig (`camera_local`). Keeping the two separate lets the smoothed
//! cursor offset and the scroll offset be applied independently.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_Z};
use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct CameraRig {
    pub group_position: Vec3,
    pub camera_local: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        Self {
            group_position: Vec3::ZERO,
            camera_local: Vec3::new(0.0, 0.0, CAMERA_Z),
            aspect: sanitize_aspect(aspect),
            fovy_radians: CAMERA_FOV_DEGREES.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    /// World-space camera position.
    pub fn eye(&self) -> Vec3 {
        self.group_position + self.camera_local
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// The camera looks down -Z with no rotation of its own.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.eye())
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[inline]
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
