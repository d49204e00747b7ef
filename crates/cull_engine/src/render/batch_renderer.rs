//! # Batch Renderer
//!
//! Collects the frame's surviving entities into per-LOD buckets and flushes
//! them in a fixed order so the draw interface sees at most one change of
//! mesh detail per bucket.
//!
//! ## Architecture
//!
//! - **BatchRenderer**: Buckets instances and drives the flush
//! - **InstanceData**: GPU-uploadable per-instance record (`bytemuck::Pod`)
//! - **BatchStats**: Per-frame counters

use crate::culling::LodLevel;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{DrawCommand, DrawInterface};
use crate::scene::Entity;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Result type for batch rendering operations
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that can occur during batch rendering
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Too many instances for a single batch
    #[error("Batch capacity exceeded: {current} > {max}")]
    CapacityExceeded {
        /// Instance count the rejected add would have produced
        current: usize,
        /// Maximum allowed instances
        max: usize,
    },
}

/// Batch renderer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Maximum instances per frame
    pub max_instances: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { max_instances: 10_000 }
    }
}

/// Per-instance record in the layout uploaded to instance buffers
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Column-major model matrix
    pub model: [[f32; 4]; 4],
    /// LOD bucket index (0 = High)
    pub lod: u32,
    /// Pads the record to a 16-byte multiple
    pub _padding: [u32; 3],
}

impl InstanceData {
    fn new(transform: &Mat4, lod: LodLevel) -> Self {
        Self {
            model: (*transform).into(),
            lod: lod as u32,
            _padding: [0; 3],
        }
    }
}

/// One queued instance
#[derive(Debug, Clone, Copy)]
struct BatchInstance {
    transform: Mat4,
    distance: f32,
}

/// Statistics for batch rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Instances flushed in the last batch
    pub instances_submitted: usize,
    /// Instances drawn at High detail
    pub high: usize,
    /// Instances drawn at Medium detail
    pub medium: usize,
    /// Instances drawn at Low detail
    pub low: usize,
    /// Non-empty buckets flushed, i.e. changes of mesh detail
    pub detail_switches: usize,
}

impl BatchStats {
    /// Instances drawn at `level`
    pub fn count(&self, level: LodLevel) -> usize {
        match level {
            LodLevel::High => self.high,
            LodLevel::Medium => self.medium,
            LodLevel::Low => self.low,
            LodLevel::Culled => 0,
        }
    }
}

/// LOD-bucketed draw submitter
#[derive(Debug)]
pub struct BatchRenderer {
    /// High, Medium, Low
    buckets: [Vec<BatchInstance>; 3],
    /// Flushed instances in draw order
    uploaded: Vec<InstanceData>,
    config: BatchConfig,
    stats: BatchStats,
}

impl BatchRenderer {
    /// Create a batch renderer
    pub fn new(config: BatchConfig) -> Self {
        Self {
            buckets: Default::default(),
            uploaded: Vec::new(),
            config,
            stats: BatchStats::default(),
        }
    }

    fn bucket_index(level: LodLevel) -> Option<usize> {
        match level {
            LodLevel::High => Some(0),
            LodLevel::Medium => Some(1),
            LodLevel::Low => Some(2),
            LodLevel::Culled => None,
        }
    }

    /// Start a new batch, discarding anything queued
    pub fn begin_batch(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.stats = BatchStats::default();
    }

    /// Queue an entity at `lod`
    ///
    /// `Culled` is skipped. `viewer` orders each bucket front to back.
    pub fn add_instance(&mut self, entity: &Entity, lod: LodLevel, viewer: Vec3) -> BatchResult<()> {
        let Some(index) = Self::bucket_index(lod) else {
            return Ok(());
        };

        let queued = self.len();
        if queued >= self.config.max_instances {
            return Err(BatchError::CapacityExceeded {
                current: queued + 1,
                max: self.config.max_instances,
            });
        }

        self.buckets[index].push(BatchInstance {
            transform: entity.transform(),
            distance: (entity.position - viewer).magnitude(),
        });
        Ok(())
    }

    /// Flush High, then Medium, then Low
    pub fn end_batch<D: DrawInterface + ?Sized>(&mut self, draw: &mut D) {
        self.uploaded.clear();

        for (bucket, level) in self.buckets.iter_mut().zip(LodLevel::DRAWN) {
            if bucket.is_empty() {
                continue;
            }
            bucket.sort_by(|a, b| a.distance.total_cmp(&b.distance));

            let subdivisions = level.subdivisions();
            for instance in bucket.iter() {
                draw.draw_box(&DrawCommand::new(instance.transform, subdivisions));
                self.uploaded.push(InstanceData::new(&instance.transform, level));
            }

            match level {
                LodLevel::High => self.stats.high = bucket.len(),
                LodLevel::Medium => self.stats.medium = bucket.len(),
                LodLevel::Low => self.stats.low = bucket.len(),
                LodLevel::Culled => {}
            }
            self.stats.detail_switches += 1;
        }

        self.stats.instances_submitted = self.uploaded.len();
        log::trace!(
            "Batch flushed: {} instances ({} high, {} medium, {} low)",
            self.stats.instances_submitted,
            self.stats.high,
            self.stats.medium,
            self.stats.low
        );
    }

    /// Instances currently queued
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Last flushed instances, in draw order
    pub fn instances(&self) -> &[InstanceData] {
        &self.uploaded
    }

    /// Last flushed instances as raw bytes for a GPU instance buffer
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uploaded)
    }

    /// Statistics for the last batch
    pub fn stats(&self) -> BatchStats {
        self.stats
    }

    /// Current configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}

impl Default for BatchRenderer {
    fn default() -> Self {
        Self::new(BatchConfig::default())
    }
}
