//! # Unified Configuration
//!
//! Every tunable of the culling pipeline in one serializable tree, loadable
//! from TOML or RON through the [`Config`] trait.
//!
//! ## Configuration Categories
//!
//! - **Octree**: root bounds and subdivision limits
//! - **LOD**: distance thresholds
//! - **Occlusion**: query cadence
//! - **Batch**: instance cap
//! - **Defaults**: engine-wide feature switches inherited by scenes
//! - **Projection**: lens used to build the projection matrix

use crate::culling::{LodSettings, OcclusionConfig};
use crate::foundation::math::{utils, Mat4, Mat4Ext};
use crate::render::BatchConfig;
use crate::scene::FeatureDefaults;
use crate::spatial::OctreeConfig;
use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError, ConfigResult};

/// # Projection Configuration
///
/// Perspective lens shared by every scene of an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width / height
    pub aspect: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            aspect: 4.0 / 3.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl ProjectionConfig {
    /// Set the aspect ratio from a viewport size; zero height is ignored
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height == 0 {
            log::warn!("Ignoring viewport with zero height ({}x{})", width, height);
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Perspective projection matrix for this lens
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(utils::deg_to_rad(self.fov_degrees), self.aspect, self.near, self.far)
    }

    /// Validate the lens parameters
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid("projection.fov_degrees", format!("{} is not in (0, 180)", self.fov_degrees)));
        }
        if self.aspect <= 0.0 {
            return Err(invalid("projection.aspect", format!("{} must be positive", self.aspect)));
        }
        if self.near <= 0.0 {
            return Err(invalid("projection.near", format!("{} must be positive", self.near)));
        }
        if self.far <= self.near {
            return Err(invalid("projection.far", format!("{} must exceed near ({})", self.far, self.near)));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

/// # Complete Culling Configuration
///
/// Top-level configuration applications load at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    /// Octree bounds and limits for every new scene
    pub octree: OctreeConfig,
    /// LOD thresholds for every new scene
    pub lod: LodSettings,
    /// Occlusion query cadence
    pub occlusion: OcclusionConfig,
    /// Batch renderer limits
    pub batch: BatchConfig,
    /// Engine-wide feature defaults
    pub defaults: FeatureDefaults,
    /// Projection lens
    pub projection: ProjectionConfig,
}

impl CullingConfig {
    /// Replace the octree configuration
    pub fn with_octree(mut self, octree: OctreeConfig) -> Self {
        self.octree = octree;
        self
    }

    /// Replace the LOD thresholds
    pub fn with_lod(mut self, lod: LodSettings) -> Self {
        self.lod = lod;
        self
    }

    /// Replace the feature defaults
    pub fn with_defaults(mut self, defaults: FeatureDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the projection lens
    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }

    /// Validate the entire configuration
    ///
    /// Out-of-order LOD thresholds are accepted; scenes log a warning when
    /// they are applied.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.octree.half_size <= 0.0 {
            return Err(invalid("octree.half_size", format!("{} must be positive", self.octree.half_size)));
        }
        if self.octree.max_entities_per_node == 0 {
            return Err(invalid("octree.max_entities_per_node", "must be at least 1".to_string()));
        }
        if self.batch.max_instances == 0 {
            return Err(invalid("batch.max_instances", "must be at least 1".to_string()));
        }
        self.projection.validate()
    }
}

impl Config for CullingConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = CullingConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.octree.half_size, 100.0);
        assert_eq!(config.octree.max_depth, 5);
        assert_eq!(config.octree.max_entities_per_node, 8);
        assert_eq!(config.occlusion.requery_interval, 3);
    }

    #[test]
    fn test_parse_partial_toml() {
        let text = r#"
            [octree]
            half_size = 250.0

            [lod]
            cull_distance = 400.0

            [defaults]
            occlusion_culling = true
        "#;
        let config = CullingConfig::from_str_with_format(text, "culling.toml").expect("valid toml");

        assert_relative_eq!(config.octree.half_size, 250.0);
        assert_eq!(config.octree.max_depth, 5);
        assert_relative_eq!(config.lod.cull_distance, 400.0);
        assert_relative_eq!(config.lod.high_detail_distance, 10.0);
        assert!(config.defaults.occlusion_culling);
        assert!(config.defaults.frustum_culling);
    }

    #[test]
    fn test_parse_ron() {
        let text = "(batch: (max_instances: 64), projection: (fov_degrees: 60.0))";
        let config = CullingConfig::from_str_with_format(text, "culling.ron").expect("valid ron");
        assert_eq!(config.batch.max_instances, 64);
        assert_relative_eq!(config.projection.fov_degrees, 60.0);
        assert_relative_eq!(config.projection.far, 1000.0);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = CullingConfig::from_str_with_format("", "culling.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = CullingConfig::default().with_projection(ProjectionConfig {
            near: 10.0,
            far: 5.0,
            ..ProjectionConfig::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "projection.far", .. })
        ));

        let config = CullingConfig::default().with_octree(OctreeConfig {
            half_size: 0.0,
            ..OctreeConfig::default()
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "octree.half_size", .. })
        ));

        // Out-of-order LOD is accepted
        let config = CullingConfig::default().with_lod(LodSettings::new(50.0, 10.0, 20.0, 30.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_viewport_sets_aspect() {
        let mut projection = ProjectionConfig::default();
        projection.set_viewport(1920, 1080);
        assert_relative_eq!(projection.aspect, 16.0 / 9.0);
        projection.set_viewport(640, 0);
        assert_relative_eq!(projection.aspect, 16.0 / 9.0);
    }
}
