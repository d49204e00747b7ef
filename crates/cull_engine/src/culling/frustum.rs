//! View frustum extraction and visibility tests
//!
//! Planes are pulled out of the combined projection × view matrix with the
//! Gribb-Hartmann row-combination method. Every plane normal points into the
//! frustum, so a point is inside when its signed distance is non-negative for
//! all six planes.

use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::scene::Entity;
use crate::spatial::AABB;

/// Plane defined by normal and distance from origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Plane {
    /// Normal vector (unit length once extracted from a matrix)
    pub normal: Vec3,
    /// Distance from origin along the normal
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from normal and distance, normalizing both
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self::from_coefficients(Vec4::new(normal.x, normal.y, normal.z, distance))
    }

    /// Build from raw `(a, b, c, d)` coefficients of `ax + by + cz + d = 0`.
    ///
    /// A zero-length normal is kept as-is: such a plane accepts every point
    /// with `d >= 0`, which is what a degenerate matrix row should do.
    fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.xyz();
        let length = normal.magnitude();
        if length > f32::EPSILON {
            Self {
                normal: normal / length,
                distance: coefficients.w / length,
            }
        } else {
            Self {
                normal,
                distance: coefficients.w,
            }
        }
    }

    /// Calculate signed distance from plane to point
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }
}

/// Names of the six frustum planes, usable as indices into [`Frustum::planes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumSide {
    /// x >= -w
    Left = 0,
    /// x <= w
    Right = 1,
    /// y >= -w
    Bottom = 2,
    /// y <= w
    Top = 3,
    /// z >= -w
    Near = 4,
    /// z <= w
    Far = 5,
}

impl FrustumSide {
    /// All sides in plane-array order
    pub const ALL: [FrustumSide; 6] = [
        FrustumSide::Left,
        FrustumSide::Right,
        FrustumSide::Bottom,
        FrustumSide::Top,
        FrustumSide::Near,
        FrustumSide::Far,
    ];
}

/// Frustum for visibility culling
///
/// A default frustum has six zero planes and therefore reports everything as
/// visible until the first [`Frustum::update`].
#[derive(Debug, Clone, Default)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    /// Create a frustum from six planes
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Extract frustum planes from a combined projection × view matrix
    pub fn from_matrix(clip: &Mat4) -> Self {
        let row = |i: usize| -> Vec4 { clip.row(i).transpose() };
        let (r0, r1, r2, r3) = (row(0), row(1), row(2), row(3));

        Self {
            planes: [
                Plane::from_coefficients(r3 + r0),
                Plane::from_coefficients(r3 - r0),
                Plane::from_coefficients(r3 + r1),
                Plane::from_coefficients(r3 - r1),
                Plane::from_coefficients(r3 + r2),
                Plane::from_coefficients(r3 - r2),
            ],
        }
    }

    /// Recompute the planes for this frame
    pub fn update(&mut self, projection: &Mat4, view: &Mat4) {
        *self = Self::from_matrix(&(projection * view));
    }

    /// All six planes in [`FrustumSide`] order
    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// A single plane by side
    pub fn plane(&self, side: FrustumSide) -> &Plane {
        &self.planes[side as usize]
    }

    /// Conservative AABB test using the positive vertex of each plane.
    ///
    /// Never rejects a box that is actually visible; may keep boxes that sit
    /// just outside a frustum corner.
    pub fn is_box_visible(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            let positive = Vec3::new(
                if plane.normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if plane.normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if plane.normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            plane.distance_to_point(positive) >= 0.0
        })
    }

    /// [`Frustum::is_box_visible`] on an entity's bounds
    pub fn is_entity_visible(&self, entity: &Entity) -> bool {
        self.is_box_visible(&entity.bounds())
    }

    /// Sphere test with a `-radius` tolerance per plane
    pub fn is_sphere_visible(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }
}
