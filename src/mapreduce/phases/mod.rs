//! Phase execution module for word-count MapReduce
//!
//! Each invocation runs four phases in a fixed order, with a barrier after
//! every parallel phase:
//!
//! ```text
//! lines ─► [Map ×N] ─barrier─► [Shuffle] ─► [Reduce ×N] ─barrier─► [Combine] ─► counts
//! ```
//!
//! - **Map**: one task per line chunk, each producing a partial count map.
//! - **Shuffle**: union of the partial key sets, sorted for reproducible grouping.
//! - **Reduce**: one task per key group, summing each key across every partial map.
//! - **Combine**: merge of the reduced maps into the final mapping.
//!
//! Parallel phases publish into a [`SlotArray`], one slot per task, so no
//! lock is ever taken on the aggregate output. A failed task aborts the
//! whole invocation; nothing is retried.

pub mod combine;
pub mod map;
pub mod pool;
pub mod reduce;
pub mod shuffle;
pub mod slots;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use combine::CombinePhase;
pub use map::MapPhase;
pub use pool::{run_parallel_phase, CancelFlag};
pub use reduce::ReducePhase;
pub use shuffle::ShufflePhase;
pub use slots::SlotArray;

/// Type of phase in a word-count invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseType {
    /// Parallel per-chunk counting
    Map,
    /// Key-set union between the two parallel phases
    Shuffle,
    /// Parallel per-key-group summation
    Reduce,
    /// Final merge of reduced maps
    Combine,
}

impl std::fmt::Display for PhaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhaseType::Map => write!(f, "Map"),
            PhaseType::Shuffle => write!(f, "Shuffle"),
            PhaseType::Reduce => write!(f, "Reduce"),
            PhaseType::Combine => write!(f, "Combine"),
        }
    }
}

/// Metrics collected during phase execution
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseMetrics {
    /// Wall-clock time spent in the phase
    pub duration: Duration,
    /// Number of tasks the phase ran
    pub tasks: usize,
    /// Number of distinct keys the phase produced
    pub keys: usize,
}

/// Per-phase metrics for one invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseTimings {
    pub map: PhaseMetrics,
    pub shuffle: PhaseMetrics,
    pub reduce: PhaseMetrics,
    pub combine: PhaseMetrics,
}

impl PhaseTimings {
    /// Record the metrics of a finished phase
    pub fn record(&mut self, phase: PhaseType, metrics: PhaseMetrics) {
        match phase {
            PhaseType::Map => self.map = metrics,
            PhaseType::Shuffle => self.shuffle = metrics,
            PhaseType::Reduce => self.reduce = metrics,
            PhaseType::Combine => self.combine = metrics,
        }
    }

    pub fn get(&self, phase: PhaseType) -> &PhaseMetrics {
        match phase {
            PhaseType::Map => &self.map,
            PhaseType::Shuffle => &self.shuffle,
            PhaseType::Reduce => &self.reduce,
            PhaseType::Combine => &self.combine,
        }
    }

    /// Sum of all phase durations
    pub fn total(&self) -> Duration {
        self.map.duration + self.shuffle.duration + self.reduce.duration + self.combine.duration
    }
}
