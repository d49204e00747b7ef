//! Spatial partitioning data structures
//!
//! Bounding boxes and the octree used to accelerate frustum, range,
//! box and ray queries over scene entities.

mod aabb;
mod octree;

pub use aabb::AABB;
pub use octree::{Octree, OctreeConfig, OctreeEntry, OctreeNode, RayHit};
