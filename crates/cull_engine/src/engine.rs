//! Engine context
//!
//! Owns every scene, tracks which one is active, and holds the engine-wide
//! defaults new scenes start from. Drivers create one [`Engine`] and call
//! [`Engine::frame`] once per frame.

use crate::core::{ConfigError, CullingConfig};
use crate::culling::LodSettings;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{CameraView, DrawInterface, OcclusionQueryBackend};
use crate::scene::{CullingStats, EntityId, Feature, FeatureDefaults, Scene};
use crate::spatial::RayHit;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// No scene with this name
    #[error("Scene not found: {0}")]
    SceneNotFound(String),

    /// Configuration failed to load or validate
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Scene registry plus engine-wide defaults
#[derive(Debug)]
pub struct Engine {
    scenes: HashMap<String, Scene>,
    active: Option<String>,
    config: CullingConfig,
    projection: Mat4,
}

impl Engine {
    /// Create an engine with no scenes
    pub fn new(config: CullingConfig) -> EngineResult<Self> {
        config.validate()?;
        log::info!("Initializing engine...");

        let projection = config.projection.matrix();
        Ok(Self {
            scenes: HashMap::new(),
            active: None,
            config,
            projection,
        })
    }

    /// Load a configuration file and create an engine from it
    pub fn from_config_file(path: &str) -> EngineResult<Self> {
        use crate::core::Config;
        let config = CullingConfig::load_from_file(path)?;
        log::info!("Loaded configuration from {}", path);
        Self::new(config)
    }

    /// Create a scene, or return the existing one with that name
    ///
    /// The first scene created becomes active.
    pub fn create_scene(&mut self, name: &str) -> &mut Scene {
        match self.scenes.entry(name.to_string()) {
            Entry::Occupied(entry) => {
                log::warn!("Scene '{}' already exists", name);
                entry.into_mut()
            }
            Entry::Vacant(entry) => {
                if self.active.is_none() {
                    self.active = Some(name.to_string());
                }
                entry.insert(Scene::with_config(name, &self.config))
            }
        }
    }

    /// Scene by name
    pub fn scene(&self, name: &str) -> Option<&Scene> {
        self.scenes.get(name)
    }

    /// Mutable scene by name
    pub fn scene_mut(&mut self, name: &str) -> Option<&mut Scene> {
        self.scenes.get_mut(name)
    }

    /// Switch the active scene
    pub fn set_active_scene(&mut self, name: &str) -> EngineResult<()> {
        if !self.scenes.contains_key(name) {
            return Err(EngineError::SceneNotFound(name.to_string()));
        }
        self.active = Some(name.to_string());
        log::info!("Switched to scene: {}", name);
        Ok(())
    }

    /// Remove a scene and hand it back
    ///
    /// Deleting the active scene leaves no scene active. The caller should
    /// release the scene's occlusion queries if it used any.
    pub fn delete_scene(&mut self, name: &str) -> Option<Scene> {
        let scene = self.scenes.remove(name)?;
        if self.active.as_deref() == Some(name) {
            self.active = None;
        }
        log::info!("Deleted scene: {}", name);
        Some(scene)
    }

    /// Name of the active scene
    pub fn active_scene_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active scene
    pub fn active_scene(&self) -> Option<&Scene> {
        self.scenes.get(self.active.as_deref()?)
    }

    /// The active scene, mutably
    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.get_mut(self.active.as_deref()?)
    }

    /// Scene names in sorted order
    pub fn scene_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.scenes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Change an engine-wide default and push it to every scene that has not
    /// overridden that feature
    pub fn set_default_feature(&mut self, feature: Feature, enabled: bool) {
        self.config.defaults.set(feature, enabled);
        for scene in self.scenes.values_mut() {
            scene.inherit_settings(&self.config.defaults);
        }
        log::debug!("Default {:?} set to {}", feature, enabled);
    }

    /// Engine-wide feature defaults
    pub fn defaults(&self) -> &FeatureDefaults {
        &self.config.defaults
    }

    /// Apply LOD thresholds to every scene and to scenes created later
    pub fn set_lod_settings(&mut self, settings: LodSettings) {
        self.config.lod = settings;
        for scene in self.scenes.values_mut() {
            scene.set_lod_settings(settings);
        }
    }

    /// Rebuild the projection for a new viewport size
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.config.projection.set_viewport(width, height);
        self.projection = self.config.projection.matrix();
    }

    /// Current projection matrix
    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    /// Current configuration, including pushed defaults
    pub fn config(&self) -> &CullingConfig {
        &self.config
    }

    /// Update and render the active scene
    ///
    /// Returns None when no scene is active.
    pub fn frame<D>(&mut self, device: &mut D, camera: &dyn CameraView) -> Option<CullingStats>
    where
        D: DrawInterface + OcclusionQueryBackend + ?Sized,
    {
        let projection = self.projection;
        let scene = self.active_scene_mut()?;
        scene.update(Some(camera), &projection);
        scene.render(device, Some(camera));
        Some(scene.culling_stats())
    }

    /// Range query on the active scene
    pub fn query_range(&self, center: Vec3, radius: f32) -> Vec<EntityId> {
        self.active_scene()
            .map(|scene| scene.query_range(center, radius))
            .unwrap_or_default()
    }

    /// Box query on the active scene
    pub fn query_aabb(&self, min: Vec3, max: Vec3) -> Vec<EntityId> {
        self.active_scene()
            .map(|scene| scene.query_aabb(min, max))
            .unwrap_or_default()
    }

    /// Raycast against the active scene
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<EntityId>> {
        self.active_scene()?.raycast(origin, direction, max_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProjectionConfig;
    use crate::render::{Camera, HeadlessDevice};

    fn engine() -> Engine {
        Engine::new(CullingConfig::default()).expect("default config is valid")
    }

    #[test]
    fn test_first_scene_becomes_active() {
        let mut engine = engine();
        assert!(engine.active_scene().is_none());

        engine.create_scene("main");
        engine.create_scene("test");

        assert_eq!(engine.active_scene_name(), Some("main"));
        assert_eq!(engine.scene_names(), vec!["main", "test"]);
    }

    #[test]
    fn test_create_existing_scene_returns_it() {
        let mut engine = engine();
        engine.create_scene("main").create_cube(Vec3::zeros(), 1.0);

        let again = engine.create_scene("main");
        assert_eq!(again.entity_count(), 1);
        assert_eq!(engine.scene_names().len(), 1);
    }

    #[test]
    fn test_set_active_scene() {
        let mut engine = engine();
        engine.create_scene("main");
        engine.create_scene("performance");

        engine.set_active_scene("performance").expect("scene exists");
        assert_eq!(engine.active_scene_name(), Some("performance"));

        let err = engine.set_active_scene("missing").unwrap_err();
        assert!(matches!(err, EngineError::SceneNotFound(name) if name == "missing"));
        assert_eq!(engine.active_scene_name(), Some("performance"));
    }

    #[test]
    fn test_delete_active_scene() {
        let mut engine = engine();
        engine.create_scene("main");
        engine.create_scene("test");

        let deleted = engine.delete_scene("main").expect("scene exists");
        assert_eq!(deleted.name(), "main");
        assert!(engine.active_scene().is_none());
        assert!(engine.delete_scene("main").is_none());

        let mut device = HeadlessDevice::new();
        assert!(engine.frame(&mut device, &Camera::default()).is_none());
    }

    #[test]
    fn test_default_features_respect_scene_overrides() {
        let mut engine = engine();
        engine.create_scene("main");
        engine
            .create_scene("test")
            .set_feature(Feature::OcclusionCulling, false);

        engine.set_default_feature(Feature::OcclusionCulling, true);

        let main = engine.scene("main").expect("main exists");
        let test = engine.scene("test").expect("test exists");
        assert!(main.is_feature_enabled(Feature::OcclusionCulling));
        assert!(!test.is_feature_enabled(Feature::OcclusionCulling));

        // Scenes created later start from the new defaults
        assert!(engine
            .create_scene("late")
            .is_feature_enabled(Feature::OcclusionCulling));
    }

    #[test]
    fn test_lod_settings_reach_all_scenes() {
        let mut engine = engine();
        engine.create_scene("main");
        let settings = LodSettings::new(1.0, 2.0, 3.0, 4.0);

        engine.set_lod_settings(settings);
        engine.create_scene("test");

        for name in ["main", "test"] {
            assert_eq!(engine.scene(name).map(|s| *s.lod_settings()), Some(settings));
        }
    }

    #[test]
    fn test_frame_renders_active_scene() {
        let mut engine = engine();
        let scene = engine.create_scene("main");
        scene.create_cube(Vec3::zeros(), 1.0);
        scene.create_cube(Vec3::new(0.0, 0.0, 50.0), 1.0);
        let mut device = HeadlessDevice::new();

        let stats = engine
            .frame(&mut device, &Camera::default())
            .expect("main is active");

        assert_eq!(stats.total_entities, 2);
        assert_eq!(stats.rendered, 1);
        assert_eq!(stats.frustum_culled, 1);
        assert_eq!(device.draws().len(), 1);
        assert_eq!(engine.query_range(Vec3::zeros(), 1.0).len(), 1);
        assert!(engine.raycast(Vec3::new(0.0, 0.0, 10.0), -Vec3::z(), 100.0).is_some());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CullingConfig::default().with_projection(ProjectionConfig {
            near: 0.0,
            ..ProjectionConfig::default()
        });
        assert!(matches!(Engine::new(config), Err(EngineError::Config(_))));
    }

    #[test]
    fn test_viewport_changes_projection() {
        let mut engine = engine();
        let before = *engine.projection();
        engine.set_viewport(1920, 1080);
        assert_ne!(before, *engine.projection());
        assert!((engine.config().projection.aspect - 16.0 / 9.0).abs() < 1e-6);
    }
}
