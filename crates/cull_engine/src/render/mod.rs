//! # Rendering Seams
//!
//! The culling pipeline is API agnostic: it talks to the GPU only through the
//! two traits in [`draw`]. This module also provides the LOD-bucketed
//! [`BatchRenderer`], the [`Camera`] used by drivers, and an in-memory
//! [`HeadlessDevice`] that implements both traits.

pub mod batch_renderer;
pub mod camera;
pub mod draw;
pub mod headless;

pub use batch_renderer::{BatchConfig, BatchError, BatchRenderer, BatchResult, BatchStats, InstanceData};
pub use camera::{Camera, CameraView};
pub use draw::{
    DrawCommand, DrawInterface, OcclusionQueryBackend, QueryHandle, QueryPoll,
    DIRECT_DRAW_SUBDIVISIONS,
};
pub use headless::{HeadlessDevice, HeadlessStats, SampleFn};
