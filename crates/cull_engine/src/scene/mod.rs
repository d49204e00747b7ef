//! Scene management
//!
//! Entities, feature switches, statistics and the [`Scene`] that ties the
//! culling pipeline together.

mod culling_scene;
mod entity;
mod features;
mod stats;

#[cfg(test)]
mod tests;

pub use culling_scene::Scene;
pub use entity::{Entity, EntityId, EntityOrigin};
pub use features::{Feature, FeatureDefaults, FeatureSettings, RenderFeatures};
pub use stats::CullingStats;
