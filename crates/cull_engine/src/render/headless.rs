//! In-memory render device
//!
//! Records every draw and answers occlusion queries from a sample function
//! after a fixed number of query passes. Lets the whole pipeline run without a
//! GPU, in tests and in the demo driver.

use crate::render::{DrawCommand, DrawInterface, OcclusionQueryBackend, QueryHandle, QueryPoll};
use crate::spatial::AABB;
use std::collections::HashMap;

/// Computes the sample count an occlusion proxy would produce
pub type SampleFn = Box<dyn Fn(&AABB) -> u64>;

#[derive(Debug, Clone, Copy, Default)]
struct QueryRecord {
    /// Pass the latest issuance happened in, plus its sample count
    issued: Option<(u64, u64)>,
}

/// Counters kept by [`HeadlessDevice`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeadlessStats {
    /// Boxes drawn since the last [`HeadlessDevice::clear_draws`]
    pub draw_calls: usize,
    /// Query passes begun
    pub query_passes: u64,
    /// Occlusion proxies drawn
    pub queries_issued: usize,
}

/// Render device that draws into a list and simulates query latency
pub struct HeadlessDevice {
    draws: Vec<DrawCommand>,
    queries: HashMap<QueryHandle, QueryRecord>,
    next_handle: u32,
    query_latency: u64,
    in_query_pass: bool,
    sample_fn: SampleFn,
    stats: HeadlessStats,
}

impl HeadlessDevice {
    /// Device whose queries resolve immediately with one passing sample
    pub fn new() -> Self {
        Self {
            draws: Vec::new(),
            queries: HashMap::new(),
            next_handle: 1,
            query_latency: 0,
            in_query_pass: false,
            sample_fn: Box::new(|_| 1),
            stats: HeadlessStats::default(),
        }
    }

    /// Number of query passes that must start before a result is ready
    pub fn with_query_latency(mut self, passes: u64) -> Self {
        self.query_latency = passes;
        self
    }

    /// Use `sample_fn` to compute query results
    pub fn with_sample_fn<F>(mut self, sample_fn: F) -> Self
    where
        F: Fn(&AABB) -> u64 + 'static,
    {
        self.set_sample_fn(sample_fn);
        self
    }

    /// Replace the sample function; affects queries issued from now on
    pub fn set_sample_fn<F>(&mut self, sample_fn: F)
    where
        F: Fn(&AABB) -> u64 + 'static,
    {
        self.sample_fn = Box::new(sample_fn);
    }

    /// Draws recorded so far
    pub fn draws(&self) -> &[DrawCommand] {
        &self.draws
    }

    /// Take the recorded draws, leaving the list empty
    pub fn take_draws(&mut self) -> Vec<DrawCommand> {
        self.stats.draw_calls = 0;
        std::mem::take(&mut self.draws)
    }

    /// Forget recorded draws
    pub fn clear_draws(&mut self) {
        self.draws.clear();
        self.stats.draw_calls = 0;
    }

    /// Query objects created and not yet deleted
    pub fn live_queries(&self) -> usize {
        self.queries.len()
    }

    /// True between `begin_query_pass` and `end_query_pass`
    pub fn is_in_query_pass(&self) -> bool {
        self.in_query_pass
    }

    /// Device counters
    pub fn stats(&self) -> HeadlessStats {
        self.stats
    }
}

impl Default for HeadlessDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HeadlessDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessDevice")
            .field("draws", &self.draws.len())
            .field("live_queries", &self.queries.len())
            .field("query_latency", &self.query_latency)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl DrawInterface for HeadlessDevice {
    fn draw_box(&mut self, command: &DrawCommand) {
        if self.in_query_pass {
            log::warn!("HeadlessDevice: draw_box called during a query pass");
        }
        self.draws.push(*command);
        self.stats.draw_calls += 1;
    }
}

impl OcclusionQueryBackend for HeadlessDevice {
    fn create_query(&mut self) -> QueryHandle {
        let handle = QueryHandle(self.next_handle);
        self.next_handle += 1;
        self.queries.insert(handle, QueryRecord::default());
        handle
    }

    fn delete_query(&mut self, handle: QueryHandle) {
        if self.queries.remove(&handle).is_none() {
            log::warn!("HeadlessDevice: deleting unknown query {:?}", handle);
        }
    }

    fn begin_query_pass(&mut self) {
        self.in_query_pass = true;
        self.stats.query_passes += 1;
    }

    fn end_query_pass(&mut self) {
        self.in_query_pass = false;
    }

    fn issue_query(&mut self, handle: QueryHandle, bounds: &AABB) {
        let samples = (self.sample_fn)(bounds);
        let pass = self.stats.query_passes;
        match self.queries.get_mut(&handle) {
            Some(record) => {
                record.issued = Some((pass, samples));
                self.stats.queries_issued += 1;
            }
            None => log::warn!("HeadlessDevice: issuing unknown query {:?}", handle),
        }
    }

    fn poll_query(&mut self, handle: QueryHandle) -> QueryPoll {
        match self.queries.get(&handle).and_then(|record| record.issued) {
            Some((pass, samples_passed)) if self.stats.query_passes >= pass + self.query_latency => {
                QueryPoll::Ready { samples_passed }
            }
            _ => QueryPoll::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec3};

    #[test]
    fn test_records_draws() {
        let mut device = HeadlessDevice::new();
        device.draw_box(&DrawCommand::new(Mat4::identity(), 2));
        device.draw_box(&DrawCommand::new(Mat4::identity(), 4));

        assert_eq!(device.stats().draw_calls, 2);
        let draws = device.take_draws();
        assert_eq!(draws.iter().map(|d| d.subdivisions).collect::<Vec<_>>(), vec![2, 4]);
        assert!(device.draws().is_empty());
    }

    #[test]
    fn test_query_latency_counts_passes() {
        let mut device = HeadlessDevice::new()
            .with_query_latency(1)
            .with_sample_fn(|bounds: &AABB| if bounds.min.x > 0.0 { 0 } else { 5 });
        let query = device.create_query();

        assert_eq!(device.poll_query(query), QueryPoll::Pending);

        device.begin_query_pass();
        device.issue_query(query, &AABB::cube(Vec3::zeros(), 1.0));
        device.end_query_pass();
        assert_eq!(device.poll_query(query), QueryPoll::Pending);

        device.begin_query_pass();
        device.end_query_pass();
        assert_eq!(device.poll_query(query), QueryPoll::Ready { samples_passed: 5 });
    }

    #[test]
    fn test_deleted_query_stays_pending() {
        let mut device = HeadlessDevice::new();
        let query = device.create_query();
        device.begin_query_pass();
        device.issue_query(query, &AABB::cube(Vec3::zeros(), 1.0));
        device.end_query_pass();
        device.delete_query(query);

        assert_eq!(device.live_queries(), 0);
        assert_eq!(device.poll_query(query), QueryPoll::Pending);
    }
}
