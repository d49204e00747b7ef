//! Drawing and occlusion-query seams
//!
//! The culling pipeline never talks to a graphics API directly. It emits
//! [`DrawCommand`]s through [`DrawInterface`] and drives hardware occlusion
//! queries through [`OcclusionQueryBackend`]. Whatever owns the GPU implements
//! both.

use crate::foundation::math::Mat4;
use crate::spatial::AABB;

/// Subdivision count for boxes drawn outside the batch path
pub const DIRECT_DRAW_SUBDIVISIONS: u32 = 1;

/// One box to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Model matrix mapping the unit cube onto the box
    pub transform: Mat4,
    /// Mesh subdivision count
    pub subdivisions: u32,
}

impl DrawCommand {
    /// Create a new draw command
    pub fn new(transform: Mat4, subdivisions: u32) -> Self {
        Self {
            transform,
            subdivisions,
        }
    }
}

/// Sink for box draws
pub trait DrawInterface {
    /// Draw a unit cube transformed by `command.transform`
    fn draw_box(&mut self, command: &DrawCommand);
}

/// Opaque handle to a backend occlusion query object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryHandle(pub u32);

/// Outcome of polling a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPoll {
    /// The GPU has not finished this query yet
    Pending,
    /// The query resolved
    Ready {
        /// Number of samples that passed the depth test
        samples_passed: u64,
    },
}

/// Backend for hardware occlusion queries
///
/// Queries are issued between [`begin_query_pass`](Self::begin_query_pass)
/// and [`end_query_pass`](Self::end_query_pass), and resolved later through
/// [`poll_query`](Self::poll_query), which must not block.
pub trait OcclusionQueryBackend {
    /// Allocate a new query object
    fn create_query(&mut self) -> QueryHandle;

    /// Release a query object
    fn delete_query(&mut self, handle: QueryHandle);

    /// Enter query mode: proxy draws are depth-tested but write nothing
    fn begin_query_pass(&mut self);

    /// Leave query mode and restore normal writes
    fn end_query_pass(&mut self);

    /// Draw the proxy box for `bounds` wrapped in the query
    fn issue_query(&mut self, handle: QueryHandle, bounds: &AABB);

    /// Non-blocking result check
    fn poll_query(&mut self, handle: QueryHandle) -> QueryPoll;
}
