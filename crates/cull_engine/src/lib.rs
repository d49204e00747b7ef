//! # Cull Engine
//!
//! Visibility determination and draw submission for a small real-time 3D
//! engine: an octree spatial index, view-frustum culling, hardware occlusion
//! queries, distance LOD and LOD-bucketed batching, run per scene.
//!
//! ## Features
//!
//! - **Octree**: arena-backed index with frustum, range, box and ray queries
//! - **Frustum Culling**: conservative plane tests extracted from the camera
//! - **Occlusion Culling**: non-blocking request/poll GPU queries
//! - **LOD Batching**: survivors grouped by detail level before submission
//! - **Per-Scene Switches**: every stage can be toggled per scene or globally
//!
//! ## Quick Start
//!
//! ```rust
//! use cull_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut engine = Engine::new(CullingConfig::default())?;
//!     let scene = engine.create_scene("main");
//!     scene.create_cube(Vec3::zeros(), 1.0);
//!
//!     let mut device = HeadlessDevice::new();
//!     let camera = Camera::default();
//!     if let Some(stats) = engine.frame(&mut device, &camera) {
//!         println!("{}", stats);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;

// Pipeline stages
pub mod culling;
pub mod render;
pub mod scene;
pub mod spatial;

mod engine;

pub use engine::{Engine, EngineError, EngineResult};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::{Config, CullingConfig, ProjectionConfig},
        culling::{Frustum, LodLevel, LodSettings},
        foundation::math::{Mat4, Vec3},
        render::{Camera, CameraView, DrawCommand, DrawInterface, HeadlessDevice, OcclusionQueryBackend},
        scene::{CullingStats, Entity, EntityId, Feature, FeatureDefaults, Scene},
        spatial::{Octree, AABB},
        Engine, EngineError, EngineResult,
    };
}
