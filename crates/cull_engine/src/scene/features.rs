//! Per-scene render feature switches
//!
//! Every scene carries four feature flags. A flag set directly on the scene is
//! latched as overridden and from then on ignores engine-wide defaults; the
//! others follow whatever defaults the engine pushes.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Set of enabled render features
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderFeatures: u8 {
        /// Reject entities outside the view frustum
        const FRUSTUM_CULLING = 1 << 0;
        /// Submit survivors through the LOD batch renderer
        const BATCH_RENDERING = 1 << 1;
        /// Use the octree for the frustum query
        const OCTREE = 1 << 2;
        /// Reject entities hidden behind others via hardware queries
        const OCCLUSION_CULLING = 1 << 3;
    }
}

/// A single render feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// See [`RenderFeatures::FRUSTUM_CULLING`]
    FrustumCulling,
    /// See [`RenderFeatures::BATCH_RENDERING`]
    BatchRendering,
    /// See [`RenderFeatures::OCTREE`]
    Octree,
    /// See [`RenderFeatures::OCCLUSION_CULLING`]
    OcclusionCulling,
}

impl Feature {
    /// Every feature
    pub const ALL: [Feature; 4] = [
        Feature::FrustumCulling,
        Feature::BatchRendering,
        Feature::Octree,
        Feature::OcclusionCulling,
    ];

    /// Bit for this feature
    pub fn flag(self) -> RenderFeatures {
        match self {
            Feature::FrustumCulling => RenderFeatures::FRUSTUM_CULLING,
            Feature::BatchRendering => RenderFeatures::BATCH_RENDERING,
            Feature::Octree => RenderFeatures::OCTREE,
            Feature::OcclusionCulling => RenderFeatures::OCCLUSION_CULLING,
        }
    }
}

/// Engine-wide defaults, in configuration-file form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureDefaults {
    /// Frustum culling on by default
    pub frustum_culling: bool,
    /// Batch rendering on by default
    pub batch_rendering: bool,
    /// Octree acceleration on by default
    pub octree: bool,
    /// Occlusion culling on by default
    pub occlusion_culling: bool,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            frustum_culling: true,
            batch_rendering: true,
            octree: true,
            occlusion_culling: false,
        }
    }
}

impl FeatureDefaults {
    /// Flag set with the enabled defaults
    pub fn flags(&self) -> RenderFeatures {
        let mut flags = RenderFeatures::empty();
        flags.set(RenderFeatures::FRUSTUM_CULLING, self.frustum_culling);
        flags.set(RenderFeatures::BATCH_RENDERING, self.batch_rendering);
        flags.set(RenderFeatures::OCTREE, self.octree);
        flags.set(RenderFeatures::OCCLUSION_CULLING, self.occlusion_culling);
        flags
    }

    /// Change one default
    pub fn set(&mut self, feature: Feature, enabled: bool) {
        match feature {
            Feature::FrustumCulling => self.frustum_culling = enabled,
            Feature::BatchRendering => self.batch_rendering = enabled,
            Feature::Octree => self.octree = enabled,
            Feature::OcclusionCulling => self.occlusion_culling = enabled,
        }
    }

    /// Whether `feature` is on by default
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.flags().contains(feature.flag())
    }
}

/// Enabled flags plus the override latch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSettings {
    enabled: RenderFeatures,
    overridden: RenderFeatures,
}

impl FeatureSettings {
    /// Start from `defaults` with nothing overridden
    pub fn from_defaults(defaults: &FeatureDefaults) -> Self {
        Self {
            enabled: defaults.flags(),
            overridden: RenderFeatures::empty(),
        }
    }

    /// Set a feature directly and latch it
    pub fn set_override(&mut self, feature: Feature, enabled: bool) {
        self.enabled.set(feature.flag(), enabled);
        self.overridden.insert(feature.flag());
    }

    /// Copy every non-overridden flag from `defaults`
    pub fn inherit(&mut self, defaults: &FeatureDefaults) {
        self.enabled = (self.enabled & self.overridden) | (defaults.flags() - self.overridden);
    }

    /// Whether `feature` is currently on
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled.contains(feature.flag())
    }

    /// Whether `feature` ignores engine defaults
    pub fn is_overridden(&self, feature: Feature) -> bool {
        self.overridden.contains(feature.flag())
    }

    /// Current flag set
    pub fn enabled(&self) -> RenderFeatures {
        self.enabled
    }
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self::from_defaults(&FeatureDefaults::default())
    }
}
