//! Shuffle phase: derive the global key set
//!
//! Runs on the orchestrator after the map barrier. Cheap relative to Map and
//! Reduce, so it is not parallelized.

use super::PhaseMetrics;
use crate::mapreduce::pure::{union_keys, CountMap};
use std::time::Instant;
use tracing::debug;

/// Output of the shuffle phase: every distinct word, ascending
#[derive(Debug, Clone)]
pub struct ShuffleOutput {
    pub keys: Vec<String>,
    pub metrics: PhaseMetrics,
}

#[derive(Debug, Clone, Default)]
pub struct ShufflePhase;

impl ShufflePhase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, partials: &[CountMap]) -> ShuffleOutput {
        let start = Instant::now();
        let keys = union_keys(partials);
        let metrics = PhaseMetrics {
            duration: start.elapsed(),
            tasks: 1,
            keys: keys.len(),
        };
        debug!(
            "Shuffle phase: {} distinct keys from {} partial maps",
            keys.len(),
            partials.len()
        );
        ShuffleOutput { keys, metrics }
    }
}
