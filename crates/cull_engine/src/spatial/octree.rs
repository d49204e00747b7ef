//! Octree spatial partitioning structure
//!
//! Divides a cubic region into hierarchical octants to accelerate frustum,
//! range, box and ray queries. Nodes live in a flat arena and refer to their
//! children by index, so clearing the tree is just resetting the arena.
//!
//! Each entity is stored exactly once: in the deepest node whose cube fully
//! contains its AABB. Anything straddling a child boundary stays in the
//! parent. Subdivision is one-way; removing entities never merges nodes.

use crate::culling::Frustum;
use crate::foundation::math::{constants, Vec3};
use crate::spatial::AABB;
use serde::{Deserialize, Serialize};

/// Index of the root node in the node arena
const ROOT: usize = 0;

/// Configuration for octree behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Center of the root cube
    pub center: Vec3,

    /// Half edge length of the root cube
    pub half_size: f32,

    /// Maximum subdivision depth (root = 0)
    pub max_depth: u32,

    /// A leaf subdivides once it holds more than this many entities
    pub max_entities_per_node: usize,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            center: Vec3::zeros(),
            half_size: 100.0,
            max_depth: 5,
            max_entities_per_node: 8,
        }
    }
}

impl OctreeConfig {
    /// Set the root cube
    pub fn with_bounds(mut self, center: Vec3, half_size: f32) -> Self {
        self.center = center;
        self.half_size = half_size;
        self
    }

    /// Set subdivision limits
    pub fn with_limits(mut self, max_depth: u32, max_entities_per_node: usize) -> Self {
        self.max_depth = max_depth;
        self.max_entities_per_node = max_entities_per_node;
        self
    }

    /// World bounds covered by the root node
    pub fn root_bounds(&self) -> AABB {
        AABB::cube(self.center, self.half_size)
    }
}

/// Entity stored in the octree: caller key plus the bounds it was inserted with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OctreeEntry<K> {
    /// Caller-side identifier
    pub key: K,
    /// Bounds snapshot taken at insertion
    pub bounds: AABB,
}

/// Single node in the octree hierarchy
#[derive(Debug, Clone)]
pub struct OctreeNode<K> {
    /// Center of this node's cube
    pub center: Vec3,

    /// Half edge length of this node's cube
    pub half_size: f32,

    /// Depth in the tree (0 = root)
    pub depth: u32,

    /// Entities attached to this node
    pub entries: Vec<OctreeEntry<K>>,

    /// Arena index of the first of 8 contiguous children, None if leaf
    first_child: Option<usize>,
}

impl<K> OctreeNode<K> {
    fn new(center: Vec3, half_size: f32, depth: u32) -> Self {
        Self {
            center,
            half_size,
            depth,
            entries: Vec::new(),
            first_child: None,
        }
    }

    /// World-space cube of this node
    pub fn bounds(&self) -> AABB {
        AABB::cube(self.center, self.half_size)
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }

    /// Arena indices of the 8 children, if subdivided
    fn children(&self) -> Option<std::ops::Range<usize>> {
        self.first_child.map(|first| first..first + 8)
    }
}

/// Closest entity hit by a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<K> {
    /// Key of the hit entity
    pub key: K,
    /// Entry distance along the ray
    pub distance: f32,
}

/// Octree spatial partitioning structure
#[derive(Debug, Clone)]
pub struct Octree<K> {
    /// Node arena; index 0 is always the root
    nodes: Vec<OctreeNode<K>>,

    /// Configuration
    config: OctreeConfig,

    /// Number of indexed entities
    entity_count: usize,
}

impl<K: Copy + PartialEq + std::fmt::Debug> Octree<K> {
    /// Create an empty octree covering the configured root cube
    pub fn new(config: OctreeConfig) -> Self {
        let root = OctreeNode::new(config.center, config.half_size, 0);
        Self {
            nodes: vec![root],
            config,
            entity_count: 0,
        }
    }

    /// Insert an entity
    ///
    /// Returns false, leaving the entity unindexed, when `bounds` is not fully
    /// inside the root cube.
    pub fn insert(&mut self, key: K, bounds: AABB) -> bool {
        if !self.nodes[ROOT].bounds().contains(&bounds) {
            log::debug!("Octree: {:?} lies outside root bounds, not indexed", key);
            return false;
        }

        let entry = OctreeEntry { key, bounds };
        let mut node_idx = ROOT;

        loop {
            match self.nodes[node_idx].children() {
                None => {
                    let node = &mut self.nodes[node_idx];
                    node.entries.push(entry);
                    if node.entries.len() > self.config.max_entities_per_node
                        && node.depth < self.config.max_depth
                    {
                        self.subdivide(node_idx);
                    }
                    break;
                }
                Some(children) => match self.containing_child(children, &bounds) {
                    Some(child) => node_idx = child,
                    None => {
                        self.nodes[node_idx].entries.push(entry);
                        break;
                    }
                },
            }
        }

        self.entity_count += 1;
        true
    }

    /// First child cube that wholly contains `bounds`
    fn containing_child(&self, children: std::ops::Range<usize>, bounds: &AABB) -> Option<usize> {
        children.into_iter().find(|&child| self.nodes[child].bounds().contains(bounds))
    }

    /// Split a leaf into 8 equal octants and push down whatever fits
    fn subdivide(&mut self, node_idx: usize) {
        let (center, quarter, depth) = {
            let node = &self.nodes[node_idx];
            (node.center, node.half_size * 0.5, node.depth + 1)
        };

        let first_child = self.nodes.len();
        for octant in 0..8 {
            // bit0 = X, bit1 = Y, bit2 = Z; set bit means the high half
            let offset = Vec3::new(
                if octant & 1 != 0 { quarter } else { -quarter },
                if octant & 2 != 0 { quarter } else { -quarter },
                if octant & 4 != 0 { quarter } else { -quarter },
            );
            self.nodes.push(OctreeNode::new(center + offset, quarter, depth));
        }
        self.nodes[node_idx].first_child = Some(first_child);

        let entries = std::mem::take(&mut self.nodes[node_idx].entries);
        let mut remaining = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.containing_child(first_child..first_child + 8, &entry.bounds) {
                Some(child) => self.nodes[child].entries.push(entry),
                None => remaining.push(entry),
            }
        }
        self.nodes[node_idx].entries = remaining;

        log::trace!(
            "Octree: subdivided node {} at depth {} ({} entries kept at parent)",
            node_idx,
            depth - 1,
            self.nodes[node_idx].entries.len()
        );
    }

    /// Remove an entity, searching only nodes that overlap `bounds`
    ///
    /// `bounds` must be the bounds the entity was inserted with.
    pub fn remove(&mut self, key: K, bounds: &AABB) -> bool {
        let mut stack = vec![ROOT];

        while let Some(node_idx) = stack.pop() {
            let node = &mut self.nodes[node_idx];
            if let Some(index) = node.entries.iter().position(|e| e.key == key) {
                node.entries.swap_remove(index);
                self.entity_count -= 1;
                return true;
            }

            if let Some(children) = node.children() {
                // Reverse so children are visited in octant order
                for child in children.rev() {
                    if self.nodes[child].bounds().intersects(bounds) {
                        stack.push(child);
                    }
                }
            }
        }

        false
    }

    /// Drop every node and entity, keeping the original root bounds
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes
            .push(OctreeNode::new(self.config.center, self.config.half_size, 0));
        self.entity_count = 0;
    }

    /// Clear, then insert every entry. Returns how many were indexed.
    pub fn rebuild<I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (K, AABB)>,
    {
        self.clear();
        let mut indexed = 0;
        for (key, bounds) in entries {
            if self.insert(key, bounds) {
                indexed += 1;
            }
        }
        log::debug!("Octree: rebuilt with {} entities in {} nodes", indexed, self.nodes.len());
        indexed
    }

    /// Entities whose bounds pass the frustum test
    pub fn query_frustum(&self, frustum: &Frustum) -> Vec<K> {
        let mut results = Vec::with_capacity(self.entity_count / 4);
        self.query_frustum_node(ROOT, frustum, &mut results);
        results
    }

    fn query_frustum_node(&self, node_idx: usize, frustum: &Frustum, results: &mut Vec<K>) {
        let node = &self.nodes[node_idx];
        if !frustum.is_box_visible(&node.bounds()) {
            return;
        }

        results.extend(
            node.entries
                .iter()
                .filter(|entry| frustum.is_box_visible(&entry.bounds))
                .map(|entry| entry.key),
        );

        if let Some(children) = node.children() {
            for child in children {
                self.query_frustum_node(child, frustum, results);
            }
        }
    }

    /// Entities whose center lies within `radius` of `center`
    pub fn query_range(&self, center: Vec3, radius: f32) -> Vec<K> {
        let mut results = Vec::new();
        self.query_range_node(ROOT, center, radius, &mut results);
        results
    }

    fn query_range_node(&self, node_idx: usize, center: Vec3, radius: f32, results: &mut Vec<K>) {
        let node = &self.nodes[node_idx];
        // Bounding sphere of the node cube
        let node_radius = node.half_size * constants::SQRT_3;
        if (node.center - center).magnitude() > radius + node_radius {
            return;
        }

        results.extend(
            node.entries
                .iter()
                .filter(|entry| (entry.bounds.center() - center).magnitude() <= radius)
                .map(|entry| entry.key),
        );

        if let Some(children) = node.children() {
            for child in children {
                self.query_range_node(child, center, radius, results);
            }
        }
    }

    /// Entities whose bounds overlap the box `[min, max]`
    pub fn query_aabb(&self, min: Vec3, max: Vec3) -> Vec<K> {
        let query = AABB::new(min, max);
        let mut results = Vec::new();
        self.query_aabb_node(ROOT, &query, &mut results);
        results
    }

    fn query_aabb_node(&self, node_idx: usize, query: &AABB, results: &mut Vec<K>) {
        let node = &self.nodes[node_idx];
        if !node.bounds().intersects(query) {
            return;
        }

        results.extend(
            node.entries
                .iter()
                .filter(|entry| entry.bounds.intersects(query))
                .map(|entry| entry.key),
        );

        if let Some(children) = node.children() {
            for child in children {
                self.query_aabb_node(child, query, results);
            }
        }
    }

    /// Closest entity along a ray, up to `max_distance`
    ///
    /// Equal distances keep whichever entity depth-first traversal met first.
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit<K>> {
        let mut closest = None;
        self.raycast_node(ROOT, origin, direction, max_distance, &mut closest);
        closest
    }

    fn raycast_node(
        &self,
        node_idx: usize,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        closest: &mut Option<RayHit<K>>,
    ) {
        let node = &self.nodes[node_idx];
        let limit = closest.map_or(max_distance, |hit| hit.distance);
        if node.bounds().ray_entry(origin, direction, limit).is_none() {
            return;
        }

        for entry in &node.entries {
            let limit = closest.map_or(max_distance, |hit| hit.distance);
            if let Some(distance) = entry.bounds.ray_entry(origin, direction, limit) {
                let better = closest.map_or(true, |hit| distance < hit.distance);
                if better {
                    *closest = Some(RayHit { key: entry.key, distance });
                }
            }
        }

        if let Some(children) = node.children() {
            for child in children {
                self.raycast_node(child, origin, direction, max_distance, closest);
            }
        }
    }

    /// Every indexed key, depth-first from the root
    pub fn entries(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.entity_count);
        let mut stack = vec![ROOT];
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            keys.extend(node.entries.iter().map(|entry| entry.key));
            if let Some(children) = node.children() {
                stack.extend(children.rev());
            }
        }
        keys
    }

    /// Cubes of all leaf nodes (for debug visualization)
    pub fn leaf_bounds(&self) -> Vec<AABB> {
        self.nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(OctreeNode::bounds)
            .collect()
    }

    /// Root node
    pub fn root(&self) -> &OctreeNode<K> {
        &self.nodes[ROOT]
    }

    /// World bounds covered by the root node
    pub fn bounds(&self) -> AABB {
        self.nodes[ROOT].bounds()
    }

    /// Number of indexed entities
    pub fn len(&self) -> usize {
        self.entity_count
    }

    /// True when nothing is indexed
    pub fn is_empty(&self) -> bool {
        self.entity_count == 0
    }

    /// Number of allocated nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Deepest depth nodes may be split to
    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    /// Change the depth limit; applies to future subdivisions only
    pub fn set_max_depth(&mut self, depth: u32) {
        self.config.max_depth = depth;
    }

    /// Change the split threshold; applies to future subdivisions only
    pub fn set_max_entities_per_node(&mut self, count: usize) {
        self.config.max_entities_per_node = count;
    }

    /// Current configuration
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }
}

impl<K: Copy + PartialEq + std::fmt::Debug> Default for Octree<K> {
    fn default() -> Self {
        Self::new(OctreeConfig::default())
    }
}
