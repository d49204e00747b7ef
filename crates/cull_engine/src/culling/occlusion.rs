//! Hardware occlusion culling
//!
//! Each tracked entity owns one backend query. A query is re-issued every
//! `requery_interval + 1` frames and its result is collected later without
//! stalling, so visibility decisions always use the most recent resolved
//! answer. An entity with no resolved answer is treated as visible.

use crate::render::{OcclusionQueryBackend, QueryHandle, QueryPoll};
use crate::spatial::AABB;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

/// Occlusion culling configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcclusionConfig {
    /// Frames to skip between two queries of the same entity
    pub requery_interval: u32,
}

impl Default for OcclusionConfig {
    fn default() -> Self {
        Self { requery_interval: 3 }
    }
}

/// Per-entity query bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OcclusionQueryState {
    /// Backend query object
    pub handle: QueryHandle,
    /// True once the latest issued query resolved
    pub result_available: bool,
    /// Samples that passed in the latest resolved query
    pub samples_passed: u64,
    /// Frames left before the next issuance
    pub frame_delay: u32,
}

/// Per-frame occlusion statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OcclusionStats {
    /// Queries sent to the backend this frame
    pub queries_issued: usize,
    /// Candidates rejected by [`OcclusionCuller::filter_visible`] this frame
    pub objects_culled: usize,
}

/// Tracks occlusion query state per entity key
#[derive(Debug)]
pub struct OcclusionCuller<K> {
    states: HashMap<K, OcclusionQueryState>,
    /// Handles of forgotten entities, released at the next query pass
    released: Vec<QueryHandle>,
    config: OcclusionConfig,
    stats: OcclusionStats,
    in_pass: bool,
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> OcclusionCuller<K> {
    /// Create a culler with no tracked entities
    pub fn new(config: OcclusionConfig) -> Self {
        Self {
            states: HashMap::new(),
            released: Vec::new(),
            config,
            stats: OcclusionStats::default(),
            in_pass: false,
        }
    }

    /// Start this frame's query pass
    pub fn begin_query_pass<B: OcclusionQueryBackend + ?Sized>(&mut self, backend: &mut B) {
        for handle in self.released.drain(..) {
            backend.delete_query(handle);
        }
        self.stats = OcclusionStats::default();
        self.in_pass = true;
        backend.begin_query_pass();
    }

    /// Issue a query for `key` if its delay has run out, otherwise count down
    ///
    /// A new issuance supersedes any result still in flight for the entity.
    pub fn issue_query<B: OcclusionQueryBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        key: K,
        bounds: &AABB,
    ) {
        if !self.in_pass {
            log::warn!("Occlusion query for {:?} issued outside a query pass", key);
        }

        let state = self.states.entry(key).or_insert_with(|| OcclusionQueryState {
            handle: backend.create_query(),
            result_available: false,
            samples_passed: 0,
            frame_delay: 0,
        });

        if state.frame_delay == 0 {
            backend.issue_query(state.handle, bounds);
            state.result_available = false;
            state.frame_delay = self.config.requery_interval;
            self.stats.queries_issued += 1;
            log::trace!("Occlusion query {:?} issued for {:?}", state.handle, key);
        } else {
            state.frame_delay -= 1;
        }
    }

    /// Close this frame's query pass
    pub fn end_query_pass<B: OcclusionQueryBackend + ?Sized>(&mut self, backend: &mut B) {
        backend.end_query_pass();
        self.in_pass = false;
    }

    /// Poll every outstanding query once and store resolved results
    pub fn update_query_results<B: OcclusionQueryBackend + ?Sized>(&mut self, backend: &mut B) {
        for state in self.states.values_mut().filter(|s| !s.result_available) {
            if let QueryPoll::Ready { samples_passed } = backend.poll_query(state.handle) {
                state.result_available = true;
                state.samples_passed = samples_passed;
            }
        }
    }

    /// False only when the latest resolved query saw zero samples
    pub fn is_visible(&self, key: K) -> bool {
        self.states
            .get(&key)
            .map_or(true, |state| !state.result_available || state.samples_passed > 0)
    }

    /// Keep the visible candidates, counting the rest as occlusion-culled
    pub fn filter_visible(&mut self, candidates: &[K]) -> Vec<K> {
        let visible: Vec<K> = candidates
            .iter()
            .copied()
            .filter(|&key| self.is_visible(key))
            .collect();
        self.stats.objects_culled += candidates.len() - visible.len();
        visible
    }

    /// Stop tracking `key`; its query is released at the next pass
    pub fn forget(&mut self, key: K) {
        if let Some(state) = self.states.remove(&key) {
            self.released.push(state.handle);
        }
    }

    /// Release every query object and drop all state
    pub fn clear<B: OcclusionQueryBackend + ?Sized>(&mut self, backend: &mut B) {
        let released = self.released.len();
        for handle in self
            .released
            .drain(..)
            .chain(self.states.drain().map(|(_, state)| state.handle))
        {
            backend.delete_query(handle);
        }
        log::debug!("Occlusion culler cleared ({} pending releases)", released);
    }

    /// State for one entity, if it has ever been queried
    pub fn state(&self, key: K) -> Option<&OcclusionQueryState> {
        self.states.get(&key)
    }

    /// Number of entities holding a query object
    pub fn tracked_count(&self) -> usize {
        self.states.len()
    }

    /// Statistics for the current frame
    pub fn stats(&self) -> OcclusionStats {
        self.stats
    }

    /// Current configuration
    pub fn config(&self) -> &OcclusionConfig {
        &self.config
    }
}

impl<K: Copy + Eq + Hash + std::fmt::Debug> Default for OcclusionCuller<K> {
    fn default() -> Self {
        Self::new(OcclusionConfig::default())
    }
}
