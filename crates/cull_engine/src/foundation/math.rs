//! Math utilities and types
//!
//! Provides the `f32` math aliases used by the culling pipeline plus the
//! projection/view helpers drivers need to feed the frustum.

pub use nalgebra::{Matrix4, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// sqrt(3), the ratio between a cube's half-diagonal and its half-size
    pub const SQRT_3: f32 = 1.732_050_8;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Mat4, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Model matrix for a box centered at `position` with full extents `size`
    pub fn box_transform(position: &Vec3, size: &Vec3) -> Mat4 {
        Mat4::new_translation(position) * Mat4::new_nonuniform_scaling(size)
    }

    /// Translation column of an affine matrix
    pub fn translation_of(matrix: &Mat4) -> Vec3 {
        Vec3::new(matrix.m14, matrix.m24, matrix.m34)
    }
}

/// Extension trait for Mat4 with camera-facing convenience constructors
pub trait Mat4Ext {
    /// Right-handed perspective projection with OpenGL clip depth (-1..1)
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // Plane extraction assumes -w <= z <= w, so no Vulkan depth remap here.
        Mat4::new_perspective(aspect, fov_y, near, far)
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_box_transform_maps_unit_cube_corner() {
        let transform = utils::box_transform(&Vec3::new(1.0, 2.0, 3.0), &Vec3::new(2.0, 4.0, 6.0));
        let corner = transform.transform_point(&Point3::new(0.5, 0.5, 0.5));
        assert_relative_eq!(corner, Point3::new(2.0, 4.0, 6.0), epsilon = 1e-6);
        assert_relative_eq!(utils::translation_of(&transform), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_look_at_moves_target_onto_negative_z() {
        let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::zeros(), Vec3::y());
        let origin_in_view = view.transform_point(&Point3::origin());
        assert_relative_eq!(origin_in_view, Point3::new(0.0, 0.0, -5.0), epsilon = 1e-6);
    }
}
