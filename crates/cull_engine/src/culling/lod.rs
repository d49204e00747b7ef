//! Distance-based level-of-detail classification

use crate::foundation::math::Vec3;
use serde::{Deserialize, Serialize};

/// Level of detail picked for an entity, ordered from most to least detailed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LodLevel {
    /// Full detail
    High,
    /// Reduced detail
    Medium,
    /// Minimal detail
    Low,
    /// Too far away to draw at all
    Culled,
}

impl LodLevel {
    /// Levels that produce geometry, in submission order
    pub const DRAWN: [LodLevel; 3] = [LodLevel::High, LodLevel::Medium, LodLevel::Low];

    /// Mesh subdivision count used when drawing at this level
    pub fn subdivisions(self) -> u32 {
        match self {
            LodLevel::High => 4,
            LodLevel::Medium => 2,
            LodLevel::Low => 1,
            LodLevel::Culled => 0,
        }
    }
}

/// Distance thresholds for LOD switching
///
/// The thresholds are expected to increase in declaration order. Nothing
/// enforces it: out-of-order values are classified as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodSettings {
    /// Beyond this distance, drop to Medium
    pub high_detail_distance: f32,
    /// Beyond this distance, drop to Low
    pub medium_detail_distance: f32,
    /// Beyond this distance, cull
    pub low_detail_distance: f32,
    /// Hard cull distance
    pub cull_distance: f32,
}

impl Default for LodSettings {
    fn default() -> Self {
        Self {
            high_detail_distance: 10.0,
            medium_detail_distance: 25.0,
            low_detail_distance: 50.0,
            cull_distance: 100.0,
        }
    }
}

impl LodSettings {
    /// Create settings from the four thresholds
    pub fn new(high: f32, medium: f32, low: f32, cull: f32) -> Self {
        Self {
            high_detail_distance: high,
            medium_detail_distance: medium,
            low_detail_distance: low,
            cull_distance: cull,
        }
    }

    /// True if `high <= medium <= low <= cull`
    pub fn is_monotonic(&self) -> bool {
        self.high_detail_distance <= self.medium_detail_distance
            && self.medium_detail_distance <= self.low_detail_distance
            && self.low_detail_distance <= self.cull_distance
    }
}

/// Maps viewer distance to a [`LodLevel`]
#[derive(Debug, Clone, Default)]
pub struct LodClassifier {
    settings: LodSettings,
}

impl LodClassifier {
    /// Create a classifier with the given thresholds
    pub fn new(settings: LodSettings) -> Self {
        Self { settings }
    }

    /// Replace the thresholds
    pub fn set_settings(&mut self, settings: LodSettings) {
        self.settings = settings;
    }

    /// Current thresholds
    pub fn settings(&self) -> &LodSettings {
        &self.settings
    }

    /// Classify an entity at `position` seen from `viewer`
    pub fn classify(&self, position: Vec3, viewer: Vec3) -> LodLevel {
        self.classify_distance((position - viewer).magnitude())
    }

    /// Classify a raw distance; each threshold is exclusive
    pub fn classify_distance(&self, distance: f32) -> LodLevel {
        let s = &self.settings;
        if distance > s.cull_distance {
            LodLevel::Culled
        } else if distance > s.low_detail_distance {
            LodLevel::Low
        } else if distance > s.medium_detail_distance {
            LodLevel::Medium
        } else {
            LodLevel::High
        }
    }
}
