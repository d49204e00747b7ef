//! # Scene
//!
//! A scene owns its entities and one instance of every pipeline stage, and
//! runs them once per frame:
//!
//! 1. frustum stage (octree query, brute-force scan, or nothing)
//! 2. optional occlusion stage
//! 3. LOD classification and batched submission, or direct draws
//!
//! Entities live in a generational arena. The octree and the occlusion cache
//! only hold [`EntityId`]s, so removing an entity can never leave a dangling
//! reference behind.

use crate::core::CullingConfig;
use crate::culling::{Frustum, LodClassifier, LodLevel, LodSettings, OcclusionCuller, OcclusionStats};
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{
    BatchRenderer, BatchStats, CameraView, DrawCommand, DrawInterface, OcclusionQueryBackend,
    DIRECT_DRAW_SUBDIVISIONS,
};
use crate::scene::{
    CullingStats, Entity, EntityId, EntityOrigin, Feature, FeatureDefaults, FeatureSettings,
};
use crate::spatial::{Octree, RayHit, AABB};
use slotmap::SlotMap;

/// Entity slot in a scene's arena
#[derive(Debug, Clone)]
struct SceneEntity {
    entity: Entity,
    origin: EntityOrigin,
    /// Bounds the entity was indexed with, None if it lies outside the octree
    indexed_bounds: Option<AABB>,
}

/// Named collection of entities plus the per-frame culling pipeline
#[derive(Debug)]
pub struct Scene {
    name: String,
    entities: SlotMap<EntityId, SceneEntity>,
    octree: Octree<EntityId>,
    frustum: Frustum,
    lod: LodClassifier,
    batch: BatchRenderer,
    occlusion: OcclusionCuller<EntityId>,
    features: FeatureSettings,
    stats: CullingStats,
}

impl Scene {
    /// Create an empty scene with default configuration
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &CullingConfig::default())
    }

    /// Create an empty scene from `config`
    pub fn with_config(name: impl Into<String>, config: &CullingConfig) -> Self {
        let name = name.into();
        log::info!("Creating scene '{}'", name);

        let mut scene = Self {
            name,
            entities: SlotMap::with_key(),
            octree: Octree::new(config.octree.clone()),
            frustum: Frustum::default(),
            lod: LodClassifier::default(),
            batch: BatchRenderer::new(config.batch.clone()),
            occlusion: OcclusionCuller::new(config.occlusion.clone()),
            features: FeatureSettings::from_defaults(&config.defaults),
            stats: CullingStats::default(),
        };
        scene.set_lod_settings(config.lod);
        scene
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    // Entity management

    /// Register a caller-built entity
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        self.insert_entity(entity, EntityOrigin::External)
    }

    /// Create a box owned by the scene
    pub fn create_rect(&mut self, position: Vec3, size: Vec3) -> EntityId {
        self.insert_entity(Entity::new(position, size), EntityOrigin::Owned)
    }

    /// Create a cube owned by the scene
    pub fn create_cube(&mut self, position: Vec3, edge: f32) -> EntityId {
        self.insert_entity(Entity::cube(position, edge), EntityOrigin::Owned)
    }

    fn insert_entity(&mut self, entity: Entity, origin: EntityOrigin) -> EntityId {
        let id = self.entities.insert(SceneEntity {
            entity,
            origin,
            indexed_bounds: None,
        });
        self.index_entity(id);
        id
    }

    /// Insert into the octree and remember the bounds used
    fn index_entity(&mut self, id: EntityId) {
        let Some(slot) = self.entities.get_mut(id) else {
            return;
        };
        let bounds = slot.entity.bounds();
        slot.indexed_bounds = if self.octree.insert(id, bounds) {
            Some(bounds)
        } else {
            log::debug!(
                "Scene '{}': entity at {:?} is outside the octree and will never pass frustum culling",
                self.name,
                slot.entity.position
            );
            None
        };
    }

    fn unindex_entity(&mut self, id: EntityId) {
        if let Some(bounds) = self.entities.get_mut(id).and_then(|slot| slot.indexed_bounds.take()) {
            self.octree.remove(id, &bounds);
        }
    }

    /// Remove an entity, returning it
    ///
    /// Its occlusion query is released at the next query pass.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        self.unindex_entity(id);
        let slot = self.entities.remove(id)?;
        self.occlusion.forget(id);
        Some(slot.entity)
    }

    /// Move or resize an entity and re-index it
    pub fn set_entity_bounds(&mut self, id: EntityId, position: Vec3, size: Vec3) -> bool {
        if !self.entities.contains_key(id) {
            return false;
        }
        self.unindex_entity(id);
        if let Some(slot) = self.entities.get_mut(id) {
            slot.entity = Entity::new(position, size);
        }
        self.index_entity(id);
        true
    }

    /// Remove every entity
    pub fn clear(&mut self) {
        for id in self.entities.keys() {
            self.occlusion.forget(id);
        }
        self.entities.clear();
        self.octree.clear();
        log::info!("Scene '{}' cleared", self.name);
    }

    /// Rebuild the octree from current entity bounds
    ///
    /// Needed after entities were changed through [`Scene::entity_mut`].
    pub fn rebuild_octree(&mut self) {
        self.octree.clear();
        let mut unindexed = 0;
        for (id, slot) in &mut self.entities {
            let bounds = slot.entity.bounds();
            slot.indexed_bounds = self.octree.insert(id, bounds).then_some(bounds);
            if slot.indexed_bounds.is_none() {
                unindexed += 1;
            }
        }
        log::debug!(
            "Scene '{}': octree rebuilt ({} entities, {} outside, {} nodes)",
            self.name,
            self.entities.len(),
            unindexed,
            self.octree.node_count()
        );
    }

    /// Entity by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id).map(|slot| &slot.entity)
    }

    /// Mutable entity by id
    ///
    /// The octree keeps the old bounds until [`Scene::rebuild_octree`] runs;
    /// use [`Scene::set_entity_bounds`] to move a single entity.
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id).map(|slot| &mut slot.entity)
    }

    /// Who created an entity
    pub fn entity_origin(&self, id: EntityId) -> Option<EntityOrigin> {
        self.entities.get(id).map(|slot| slot.origin)
    }

    /// Every entity
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities.iter().map(|(id, slot)| (id, &slot.entity))
    }

    /// Entities created through the scene factory
    pub fn owned_entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities_with_origin(EntityOrigin::Owned)
    }

    /// Entities registered with [`Scene::add_entity`]
    pub fn external_entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities_with_origin(EntityOrigin::External)
    }

    fn entities_with_origin(&self, origin: EntityOrigin) -> impl Iterator<Item = (EntityId, &Entity)> + '_ {
        self.entities
            .iter()
            .filter(move |(_, slot)| slot.origin == origin)
            .map(|(id, slot)| (id, &slot.entity))
    }

    /// Number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Entities that did not fit in the octree
    pub fn unindexed_count(&self) -> usize {
        self.entities.values().filter(|slot| slot.indexed_bounds.is_none()).count()
    }

    /// The scene's octree
    pub fn octree(&self) -> &Octree<EntityId> {
        &self.octree
    }

    // Spatial queries (octree-backed; entities outside the root are never found)

    /// Entities whose center is within `radius` of `center`
    pub fn query_range(&self, center: Vec3, radius: f32) -> Vec<EntityId> {
        self.octree.query_range(center, radius)
    }

    /// Entities overlapping the box `[min, max]`
    pub fn query_aabb(&self, min: Vec3, max: Vec3) -> Vec<EntityId> {
        self.octree.query_aabb(min, max)
    }

    /// Closest entity hit by a ray
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<EntityId>> {
        self.octree.raycast(origin, direction, max_distance)
    }

    // Settings

    /// Replace the LOD thresholds
    pub fn set_lod_settings(&mut self, settings: LodSettings) {
        if !settings.is_monotonic() {
            log::warn!(
                "Scene '{}': LOD thresholds are not increasing ({:?}); classification uses them as given",
                self.name,
                settings
            );
        }
        self.lod.set_settings(settings);
    }

    /// Current LOD thresholds
    pub fn lod_settings(&self) -> &LodSettings {
        self.lod.settings()
    }

    /// Set a feature for this scene only; engine defaults no longer apply to it
    pub fn set_feature(&mut self, feature: Feature, enabled: bool) {
        self.features.set_override(feature, enabled);
        log::debug!("Scene '{}': {:?} overridden to {}", self.name, feature, enabled);
    }

    /// Adopt `defaults` for every feature not overridden
    pub fn inherit_settings(&mut self, defaults: &FeatureDefaults) {
        self.features.inherit(defaults);
    }

    /// Whether `feature` is on
    pub fn is_feature_enabled(&self, feature: Feature) -> bool {
        self.features.is_enabled(feature)
    }

    /// Flags and override latches
    pub fn features(&self) -> &FeatureSettings {
        &self.features
    }

    // Frame

    /// Recompute the frustum from the camera, if any
    pub fn update(&mut self, camera: Option<&dyn CameraView>, projection: &Mat4) {
        if let Some(camera) = camera {
            self.update_frustum(projection, &camera.view_matrix());
        }
    }

    /// Recompute the frustum from explicit matrices
    pub fn update_frustum(&mut self, projection: &Mat4, view: &Mat4) {
        self.frustum.update(projection, view);
    }

    /// Current frustum
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Run the culling pipeline and submit survivors to `device`
    ///
    /// Without a camera every survivor is drawn at High detail.
    pub fn render<D>(&mut self, device: &mut D, camera: Option<&dyn CameraView>)
    where
        D: DrawInterface + OcclusionQueryBackend + ?Sized,
    {
        let total = self.entities.len();
        self.stats = CullingStats {
            total_entities: total,
            ..CullingStats::default()
        };

        let mut visible = self.frustum_stage();
        self.stats.frustum_culled = total.saturating_sub(visible.len());

        if self.features.is_enabled(Feature::OcclusionCulling) {
            let candidates = visible.len();
            visible = self.occlusion_stage(device, &visible);
            self.stats.occlusion_culled = candidates - visible.len();
        }

        self.stats.rendered = visible.len();

        if self.features.is_enabled(Feature::BatchRendering) {
            self.submit_batched(device, &visible, camera.map(|c| c.position()));
        } else {
            for &id in &visible {
                if let Some(slot) = self.entities.get(id) {
                    device.draw_box(&DrawCommand::new(slot.entity.transform(), DIRECT_DRAW_SUBDIVISIONS));
                }
            }
        }

        log::trace!("Scene '{}': {}", self.name, self.stats);
    }

    fn frustum_stage(&self) -> Vec<EntityId> {
        let frustum_culling = self.features.is_enabled(Feature::FrustumCulling);
        let use_octree = self.features.is_enabled(Feature::Octree);

        if frustum_culling && use_octree {
            self.octree.query_frustum(&self.frustum)
        } else if frustum_culling {
            self.entities
                .iter()
                .filter(|(_, slot)| self.frustum.is_entity_visible(&slot.entity))
                .map(|(id, _)| id)
                .collect()
        } else {
            self.entities.keys().collect()
        }
    }

    fn occlusion_stage<D>(&mut self, device: &mut D, candidates: &[EntityId]) -> Vec<EntityId>
    where
        D: OcclusionQueryBackend + ?Sized,
    {
        self.occlusion.begin_query_pass(device);
        for &id in candidates {
            if let Some(slot) = self.entities.get(id) {
                self.occlusion.issue_query(device, id, &slot.entity.bounds());
            }
        }
        self.occlusion.end_query_pass(device);
        self.occlusion.update_query_results(device);
        self.occlusion.filter_visible(candidates)
    }

    fn submit_batched<D>(&mut self, device: &mut D, visible: &[EntityId], viewer: Option<Vec3>)
    where
        D: DrawInterface + ?Sized,
    {
        self.batch.begin_batch();
        let mut overflow = Vec::new();

        for &id in visible {
            let Some(slot) = self.entities.get(id) else {
                continue;
            };
            let lod = viewer.map_or(LodLevel::High, |viewer| self.lod.classify(slot.entity.position, viewer));
            if self
                .batch
                .add_instance(&slot.entity, lod, viewer.unwrap_or_else(Vec3::zeros))
                .is_err()
            {
                overflow.push(DrawCommand::new(slot.entity.transform(), lod.subdivisions()));
            }
        }

        self.batch.end_batch(device);

        if !overflow.is_empty() {
            log::warn!(
                "Scene '{}': {} instances over the batch cap of {}, drawing them directly",
                self.name,
                overflow.len(),
                self.batch.config().max_instances
            );
            for command in &overflow {
                device.draw_box(command);
            }
        }
    }

    /// Release every occlusion query this scene holds
    pub fn release_queries<B: OcclusionQueryBackend + ?Sized>(&mut self, backend: &mut B) {
        self.occlusion.clear(backend);
    }

    // Statistics

    /// Counters from the last [`Scene::render`]
    pub fn culling_stats(&self) -> CullingStats {
        self.stats
    }

    /// Batch counters from the last batched frame
    pub fn batch_stats(&self) -> BatchStats {
        self.batch.stats()
    }

    /// Occlusion counters from the last occlusion pass
    pub fn occlusion_stats(&self) -> OcclusionStats {
        self.occlusion.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Camera, HeadlessDevice};

    fn camera() -> Camera {
        Camera::perspective(Vec3::new(0.0, 0.0, 5.0), 45.0, 4.0 / 3.0, 0.1, 1000.0)
    }

    fn projection() -> Mat4 {
        CullingConfig::default().projection.matrix()
    }

    fn assert_conserved(stats: CullingStats) {
        assert_eq!(
            stats.total_entities,
            stats.frustum_culled + stats.occlusion_culled + stats.rendered
        );
    }

    /// Two boxes in view, one behind the camera, one far beyond it
    fn populated_scene() -> Scene {
        let mut scene = Scene::new("test");
        scene.create_cube(Vec3::zeros(), 1.0);
        scene.create_cube(Vec3::new(1.0, 0.0, -3.0), 1.0);
        scene.create_cube(Vec3::new(0.0, 0.0, 20.0), 1.0);
        scene.create_cube(Vec3::new(0.0, 0.0, -99.0), 1.0);
        scene
    }

    #[test]
    fn test_frustum_culling_through_octree() {
        let mut scene = populated_scene();
        let mut device = HeadlessDevice::new();
        let camera = camera();

        scene.update(Some(&camera), &projection());
        scene.render(&mut device, Some(&camera));

        let stats = scene.culling_stats();
        assert_eq!(stats.total_entities, 4);
        assert_eq!(stats.frustum_culled, 1);
        assert_eq!(stats.rendered, 3);
        assert_conserved(stats);

        // The far box is in the frustum but beyond the cull distance
        assert_eq!(device.draws().len(), 2);
        assert_eq!(scene.batch_stats().instances_submitted, 2);
    }

    #[test]
    fn test_brute_force_matches_octree() {
        let mut scene = populated_scene();
        let mut device = HeadlessDevice::new();
        let camera = camera();
        scene.update(Some(&camera), &projection());

        scene.render(&mut device, Some(&camera));
        let with_octree = scene.culling_stats();

        scene.set_feature(Feature::Octree, false);
        scene.render(&mut device, Some(&camera));
        assert_eq!(scene.culling_stats(), with_octree);
    }

    #[test]
    fn test_out_of_bounds_entity_only_found_by_brute_force() {
        let mut scene = Scene::new("bounds");
        let mut camera = Camera::perspective(Vec3::new(500.0, 0.0, 5.0), 45.0, 4.0 / 3.0, 0.1, 1000.0);
        camera.set_target(Vec3::new(500.0, 0.0, 0.0));
        let outside = scene.create_cube(Vec3::new(500.0, 0.0, 0.0), 1.0);
        assert_eq!(scene.unindexed_count(), 1);

        let mut device = HeadlessDevice::new();
        scene.update(Some(&camera), &projection());
        scene.render(&mut device, Some(&camera));
        assert_eq!(scene.culling_stats().rendered, 0);
        assert_eq!(scene.culling_stats().frustum_culled, 1);
        assert!(scene.query_range(Vec3::new(500.0, 0.0, 0.0), 10.0).is_empty());

        scene.set_feature(Feature::Octree, false);
        scene.render(&mut device, Some(&camera));
        assert_eq!(scene.culling_stats().rendered, 1);
        assert!(scene.entity(outside).is_some());
    }

    #[test]
    fn test_no_culling_renders_everything_directly() {
        let mut scene = populated_scene();
        scene.set_feature(Feature::FrustumCulling, false);
        scene.set_feature(Feature::BatchRendering, false);
        let mut device = HeadlessDevice::new();

        scene.render(&mut device, None);

        let stats = scene.culling_stats();
        assert_eq!(stats.frustum_culled, 0);
        assert_eq!(stats.rendered, 4);
        assert!(device
            .draws()
            .iter()
            .all(|d| d.subdivisions == DIRECT_DRAW_SUBDIVISIONS));
        assert_eq!(device.draws().len(), 4);
    }

    #[test]
    fn test_default_frustum_keeps_everything() {
        let mut scene = populated_scene();
        let mut device = HeadlessDevice::new();

        // Never updated: every plane is zero
        scene.render(&mut device, None);

        assert_eq!(scene.culling_stats().rendered, 4);
        // No camera: everything is High detail
        assert!(device.draws().iter().all(|d| d.subdivisions == 4));
    }

    #[test]
    fn test_lod_buckets_follow_distance() {
        let mut scene = Scene::new("lod");
        scene.set_lod_settings(LodSettings::new(10.0, 20.0, 30.0, 40.0));
        for z in [0.0, -10.0, -20.0, -30.0, -40.0] {
            scene.create_cube(Vec3::new(0.0, 0.0, z), 1.0);
        }
        let camera = camera();
        let mut device = HeadlessDevice::new();

        scene.update(Some(&camera), &projection());
        scene.render(&mut device, Some(&camera));

        // Distances 5, 15, 25, 35, 45
        let subdivisions: Vec<u32> = device.draws().iter().map(|d| d.subdivisions).collect();
        assert_eq!(subdivisions, vec![4, 4, 2, 1]);
        assert_eq!(scene.culling_stats().rendered, 5);
    }

    #[test]
    fn test_occlusion_stage() {
        let mut scene = populated_scene();
        scene.set_feature(Feature::OcclusionCulling, true);
        // Boxes entirely beyond z = -1 are reported occluded
        let mut device = HeadlessDevice::new().with_sample_fn(|b: &AABB| u64::from(b.max.z > -1.0));
        let camera = camera();
        scene.update(Some(&camera), &projection());

        scene.render(&mut device, Some(&camera));

        let stats = scene.culling_stats();
        assert_eq!(stats.frustum_culled, 1);
        assert_eq!(stats.occlusion_culled, 2);
        assert_eq!(stats.rendered, 1);
        assert_conserved(stats);
        assert_eq!(scene.occlusion_stats().queries_issued, 3);
    }

    #[test]
    fn test_pending_occlusion_results_keep_entities() {
        let mut scene = populated_scene();
        scene.set_feature(Feature::OcclusionCulling, true);
        let mut device = HeadlessDevice::new().with_query_latency(5).with_sample_fn(|_| 0);
        let camera = camera();
        scene.update(Some(&camera), &projection());

        scene.render(&mut device, Some(&camera));

        assert_eq!(scene.culling_stats().occlusion_culled, 0);
        assert_eq!(scene.culling_stats().rendered, 3);
    }

    #[test]
    fn test_remove_entity_updates_index_and_queries() {
        let mut scene = populated_scene();
        scene.set_feature(Feature::OcclusionCulling, true);
        let mut device = HeadlessDevice::new();
        let doomed = scene.create_cube(Vec3::new(-1.0, 0.0, 0.0), 1.0);
        scene.render(&mut device, None);
        assert_eq!(device.live_queries(), 5);

        let removed = scene.remove_entity(doomed).expect("entity exists");
        assert_eq!(removed.position, Vec3::new(-1.0, 0.0, 0.0));
        assert!(scene.entity(doomed).is_none());
        assert_eq!(scene.octree().len(), 4);
        assert!(scene.remove_entity(doomed).is_none());

        scene.render(&mut device, None);
        assert_eq!(device.live_queries(), 4);
        assert_eq!(scene.culling_stats().total_entities, 4);
    }

    #[test]
    fn test_owned_and_external_entities() {
        let mut scene = Scene::new("origins");
        let owned = scene.create_rect(Vec3::zeros(), Vec3::new(1.0, 2.0, 3.0));
        let external = scene.add_entity(Entity::cube(Vec3::new(5.0, 0.0, 0.0), 2.0));

        assert_eq!(scene.entity_count(), 2);
        assert_eq!(scene.owned_entities().map(|(id, _)| id).collect::<Vec<_>>(), vec![owned]);
        assert_eq!(scene.external_entities().map(|(id, _)| id).collect::<Vec<_>>(), vec![external]);
        assert_eq!(scene.entity_origin(external), Some(EntityOrigin::External));
    }

    #[test]
    fn test_set_entity_bounds_reindexes() {
        let mut scene = Scene::new("move");
        let id = scene.create_cube(Vec3::zeros(), 1.0);

        assert!(scene.set_entity_bounds(id, Vec3::new(50.0, 0.0, 0.0), Vec3::repeat(2.0)));
        assert!(scene.query_range(Vec3::zeros(), 5.0).is_empty());
        assert_eq!(scene.query_range(Vec3::new(50.0, 0.0, 0.0), 1.0), vec![id]);

        assert!(scene.set_entity_bounds(id, Vec3::new(400.0, 0.0, 0.0), Vec3::repeat(2.0)));
        assert_eq!(scene.unindexed_count(), 1);
        assert!(scene.octree().is_empty());
    }

    #[test]
    fn test_rebuild_picks_up_mutated_entities() {
        let mut scene = Scene::new("rebuild");
        let id = scene.create_cube(Vec3::zeros(), 1.0);
        if let Some(entity) = scene.entity_mut(id) {
            entity.position = Vec3::new(0.0, 30.0, 0.0);
        }
        assert!(scene.query_range(Vec3::new(0.0, 30.0, 0.0), 1.0).is_empty());

        scene.rebuild_octree();

        assert_eq!(scene.query_range(Vec3::new(0.0, 30.0, 0.0), 1.0), vec![id]);
        let hit = scene.raycast(Vec3::zeros(), Vec3::y(), 100.0).expect("hit");
        assert_eq!(hit.key, id);
        assert_eq!(scene.query_aabb(Vec3::repeat(-1.0), Vec3::repeat(1.0)), Vec::new());
    }

    #[test]
    fn test_clear_empties_scene() {
        let mut scene = populated_scene();
        scene.clear();
        assert_eq!(scene.entity_count(), 0);
        assert!(scene.octree().is_empty());
        assert_eq!(scene.octree().node_count(), 1);
    }

    #[test]
    fn test_batch_overflow_is_drawn_directly() {
        let config = CullingConfig {
            batch: crate::render::BatchConfig { max_instances: 2 },
            ..CullingConfig::default()
        };
        let mut scene = Scene::with_config("overflow", &config);
        for x in 0..5 {
            scene.create_cube(Vec3::new(x as f32, 0.0, 0.0), 0.5);
        }
        let mut device = HeadlessDevice::new();

        scene.render(&mut device, None);

        assert_eq!(scene.batch_stats().instances_submitted, 2);
        assert_eq!(device.draws().len(), 5);
        assert_eq!(scene.culling_stats().rendered, 5);
    }

    #[test]
    fn test_inherit_respects_overrides() {
        let mut scene = Scene::new("inherit");
        scene.set_feature(Feature::BatchRendering, false);

        scene.inherit_settings(&FeatureDefaults {
            frustum_culling: false,
            batch_rendering: true,
            octree: true,
            occlusion_culling: true,
        });

        assert!(!scene.is_feature_enabled(Feature::FrustumCulling));
        assert!(!scene.is_feature_enabled(Feature::BatchRendering));
        assert!(scene.is_feature_enabled(Feature::OcclusionCulling));
    }
}
