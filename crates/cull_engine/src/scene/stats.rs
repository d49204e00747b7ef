//! Per-frame culling statistics

use std::fmt;

/// Visibility counters for one rendered frame
///
/// `total_entities == frustum_culled + occlusion_culled + rendered` always
/// holds after [`Scene::render`](crate::scene::Scene::render).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullingStats {
    /// Entities in the scene
    pub total_entities: usize,
    /// Rejected by the frustum stage (includes entities outside the octree)
    pub frustum_culled: usize,
    /// Rejected by occlusion queries
    pub occlusion_culled: usize,
    /// Handed to the submission stage
    pub rendered: usize,
}

impl CullingStats {
    /// Everything rejected before submission
    pub fn culled(&self) -> usize {
        self.frustum_culled + self.occlusion_culled
    }

    /// Fraction of entities rejected, 0 for an empty scene
    pub fn cull_ratio(&self) -> f32 {
        if self.total_entities == 0 {
            0.0
        } else {
            self.culled() as f32 / self.total_entities as f32
        }
    }
}

impl fmt::Display for CullingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total: {:>6} | Rendered: {:>6} | Culled: {:>6} | Occluded: {:>6}",
            self.total_entities, self.rendered, self.frustum_culled, self.occlusion_culled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cull_ratio() {
        let stats = CullingStats {
            total_entities: 8,
            frustum_culled: 3,
            occlusion_culled: 1,
            rendered: 4,
        };
        assert_eq!(stats.culled(), 4);
        assert_relative_eq!(stats.cull_ratio(), 0.5);
        assert_relative_eq!(CullingStats::default().cull_ratio(), 0.0);
    }

    #[test]
    fn test_display_line() {
        let stats = CullingStats {
            total_entities: 10,
            frustum_culled: 4,
            occlusion_culled: 0,
            rendered: 6,
        };
        assert_eq!(
            stats.to_string(),
            "Total:     10 | Rendered:      6 | Culled:      4 | Occluded:      0"
        );
    }
}
