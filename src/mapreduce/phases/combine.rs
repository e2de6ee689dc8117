//! Combine phase: merge reduced maps into the final mapping
//!
//! Runs once on the orchestrator after the reduce barrier. It is kept as a
//! discrete phase so its time is measured separately.

use super::PhaseMetrics;
use crate::mapreduce::pure::{merge_counts, rank_by_frequency, CountMap};
use std::time::Instant;
use tracing::debug;

/// Output of the combine phase
#[derive(Debug, Clone)]
pub struct CombineOutput {
    pub counts: CountMap,
    pub metrics: PhaseMetrics,
}

impl CombineOutput {
    /// Final counts ordered by descending frequency, ties by ascending word
    pub fn ranked(&self) -> Vec<(String, u64)> {
        rank_by_frequency(&self.counts)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CombinePhase;

impl CombinePhase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, reduced: Vec<CountMap>) -> CombineOutput {
        let start = Instant::now();
        let groups = reduced.len();
        let counts = merge_counts(reduced);
        let metrics = PhaseMetrics {
            duration: start.elapsed(),
            tasks: 1,
            keys: counts.len(),
        };
        debug!(
            "Combine phase: merged {} reduced maps into {} keys",
            groups,
            counts.len()
        );
        CombineOutput { counts, metrics }
    }
}
