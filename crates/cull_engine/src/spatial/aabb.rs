//! Axis-aligned bounding boxes

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box for spatial queries
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given extents (half-size)
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Create an AABB centered at a point with a full size per axis
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        Self::from_center_extents(center, size * 0.5)
    }

    /// Create an axial cube from its center and half-size
    pub fn cube(center: Vec3, half_size: f32) -> Self {
        Self::from_center_extents(center, Vec3::repeat(half_size))
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB contains a point (boundary inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if `other` lies entirely inside this AABB (boundary inclusive)
    pub fn contains(&self, other: &AABB) -> bool {
        other.min.x >= self.min.x && other.max.x <= self.max.x &&
        other.min.y >= self.min.y && other.max.y <= self.max.y &&
        other.min.z >= self.min.z && other.max.z <= self.max.z
    }

    /// Check if this AABB intersects another AABB (touching counts)
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Slab test clipped to `[0, max_distance]` along the ray.
    ///
    /// Returns the entry distance, which is 0 when the origin is inside.
    /// `direction` does not need to be normalized; distances are then in
    /// units of its length. Zero components are handled through IEEE
    /// infinities.
    pub fn ray_entry(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = max_distance;

        for axis in 0..3 {
            let inv_d = 1.0 / direction[axis];
            let mut t0 = (self.min[axis] - origin[axis]) * inv_d;
            let mut t1 = (self.max[axis] - origin[axis]) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // f32::max/min drop NaN (origin exactly on a slab of a parallel axis)
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_contains_point() {
        let aabb = AABB::new(
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, 1.0),
        );

        assert!(aabb.contains_point(Vec3::zeros()));
        assert!(aabb.contains_point(Vec3::new(0.5, 0.5, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn test_aabb_contains_is_boundary_inclusive() {
        let outer = AABB::cube(Vec3::zeros(), 2.0);
        assert!(outer.contains(&AABB::cube(Vec3::zeros(), 2.0)));
        assert!(outer.contains(&AABB::from_center_size(Vec3::new(1.5, 0.0, 0.0), Vec3::repeat(1.0))));
        assert!(!outer.contains(&AABB::from_center_size(Vec3::new(1.6, 0.0, 0.0), Vec3::repeat(1.0))));
    }

    #[test]
    fn test_aabb_intersects() {
        let aabb1 = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        let aabb2 = AABB::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(3.0, 3.0, 3.0));
        let aabb3 = AABB::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(7.0, 7.0, 7.0));

        assert!(aabb1.intersects(&aabb2));
        assert!(!aabb1.intersects(&aabb3));
    }

    #[test]
    fn test_ray_entry_distance() {
        let aabb = AABB::cube(Vec3::new(10.0, 0.0, 0.0), 1.0);

        let hit = aabb.ray_entry(Vec3::zeros(), Vec3::x(), 100.0);
        assert_eq!(hit, Some(9.0));

        // Too short to reach
        assert_eq!(aabb.ray_entry(Vec3::zeros(), Vec3::x(), 5.0), None);
        // Pointing away
        assert_eq!(aabb.ray_entry(Vec3::zeros(), -Vec3::x(), 100.0), None);
        // Parallel miss
        assert_eq!(aabb.ray_entry(Vec3::new(0.0, 5.0, 0.0), Vec3::x(), 100.0), None);
        // Origin inside
        assert_eq!(aabb.ray_entry(Vec3::new(10.0, 0.0, 0.0), Vec3::y(), 100.0), Some(0.0));
    }
}
