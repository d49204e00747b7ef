//! Entity implementation
//!
//! The only renderable primitive: an axis-aligned box given by its center and
//! full extents.

use crate::foundation::math::{utils, Mat4, Vec3};
use crate::spatial::AABB;

slotmap::new_key_type! {
    /// Stable generational handle to an entity inside a scene's arena
    pub struct EntityId;
}

/// Who created an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityOrigin {
    /// Made by the scene factory (`create_rect` / `create_cube`)
    Owned,
    /// Registered by the caller through `add_entity`
    External,
}

/// Positioned, sized bounding volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    /// World-space center
    pub position: Vec3,
    /// Full extents along each axis
    pub size: Vec3,
}

impl Entity {
    /// Create an entity from center and full size
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Self { position, size }
    }

    /// Create a cube with the same edge length on all axes
    pub fn cube(position: Vec3, edge: f32) -> Self {
        Self::new(position, Vec3::repeat(edge))
    }

    /// World-space AABB: position ± size / 2
    pub fn bounds(&self) -> AABB {
        AABB::from_center_size(self.position, self.size)
    }

    /// Model matrix mapping the unit cube onto this box
    pub fn transform(&self) -> Mat4 {
        utils::box_transform(&self.position, &self.size)
    }
}
