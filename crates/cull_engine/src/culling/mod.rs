//! Visibility determination
//!
//! Frustum extraction, distance LOD classification and hardware occlusion
//! query bookkeeping. The octree lives in [`crate::spatial`].

mod frustum;
mod lod;
mod occlusion;

pub use frustum::{Frustum, FrustumSide, Plane};
pub use lod::{LodClassifier, LodLevel, LodSettings};
pub use occlusion::{OcclusionConfig, OcclusionCuller, OcclusionQueryState, OcclusionStats};
