//! # Camera
//!
//! The culling pipeline only needs two things from a camera: where the viewer
//! stands (for LOD distances) and the world-to-view transform (for frustum
//! extraction). [`CameraView`] captures exactly that, so callers can plug in
//! their own camera types. [`Camera`] is a ready-made look-at camera.

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// What the culling pipeline reads from a camera
pub trait CameraView {
    /// World-to-view transform
    fn view_matrix(&self) -> Mat4;

    /// Viewer position in world space
    fn position(&self) -> Vec3;
}

/// Perspective look-at camera
///
/// Right-handed, Y-up view space looking down -Z.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    ///
    /// # Example
    /// ```rust
    /// use cull_engine::foundation::math::Vec3;
    /// use cull_engine::render::Camera;
    ///
    /// let camera = Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 45.0, 4.0 / 3.0, 0.1, 1000.0);
    /// assert_eq!(camera.target, Vec3::zeros());
    /// ```
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::y(),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Update camera position in world space
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("Camera position updated to: {:?}", position);
    }

    /// Update camera target (look-at point)
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Set target and up vector together
    ///
    /// The up vector does not need to be perpendicular to the view direction;
    /// the look-at construction orthonormalizes it.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
        log::trace!("Camera look_at updated - target: {:?}, up: {:?}", target, up);
    }

    /// Update camera aspect ratio for viewport changes
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        // Threshold keeps resize drags from flooding the log
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Place the camera on a horizontal circle around `center`, looking at it
    pub fn orbit(&mut self, center: Vec3, radius: f32, height: f32, angle: f32) {
        self.set_position(center + Vec3::new(radius * angle.cos(), height, radius * angle.sin()));
        self.set_target(center);
    }

    /// World-to-camera transform
    pub fn get_view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Perspective projection built from this camera's lens parameters
    pub fn get_projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined `projection × view`
    pub fn get_view_projection_matrix(&self) -> Mat4 {
        self.get_projection_matrix() * self.get_view_matrix()
    }

    /// Normalized viewing direction
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 0.0, 5.0), 45.0, 4.0 / 3.0, 0.1, 1000.0)
    }
}

impl CameraView for Camera {
    fn view_matrix(&self) -> Mat4 {
        self.get_view_matrix()
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}
