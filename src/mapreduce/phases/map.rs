//! Map phase executor for word-count MapReduce
//!
//! Splits the line sequence into one contiguous chunk per task and counts
//! each chunk independently. Every task owns its chunk view and its partial
//! count map until it hands the map back through the join.

use super::{run_parallel_phase, CancelFlag, PhaseMetrics, PhaseType};
use crate::mapreduce::errors::MapReduceResult;
use crate::mapreduce::pure::{chunk_bounds, count_line_into, CountMap, WordCharset};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Output of the map phase: one partial count map per chunk, by chunk index
#[derive(Debug, Clone)]
pub struct MapOutput {
    pub partials: Vec<CountMap>,
    pub metrics: PhaseMetrics,
}

/// Executor for the map phase
#[derive(Debug, Clone)]
pub struct MapPhase {
    charset: WordCharset,
    deadline: Option<Duration>,
}

impl MapPhase {
    /// Create a new map phase executor
    pub fn new(charset: WordCharset, deadline: Option<Duration>) -> Self {
        Self { charset, deadline }
    }

    /// Run one counting task per chunk and wait for all of them to publish
    pub async fn execute(
        &self,
        lines: Arc<[String]>,
        num_chunks: usize,
    ) -> MapReduceResult<MapOutput> {
        let start = Instant::now();
        let bounds = chunk_bounds(lines.len(), num_chunks)?;
        debug!(
            "Map phase: {} lines across {} chunks",
            lines.len(),
            bounds.len()
        );

        let charset = self.charset;
        let tasks: Vec<_> = bounds
            .into_iter()
            .map(|range| {
                let lines = Arc::clone(&lines);
                move |cancel: &CancelFlag| map_chunk(&lines[range], charset, cancel)
            })
            .collect();

        let partials = run_parallel_phase(PhaseType::Map, tasks, self.deadline).await?;

        let metrics = PhaseMetrics {
            duration: start.elapsed(),
            tasks: partials.len(),
            keys: partials.iter().map(|counts| counts.len()).sum(),
        };
        debug!(
            "Map phase completed: {} partial maps in {:?}",
            partials.len(),
            metrics.duration
        );

        Ok(MapOutput { partials, metrics })
    }
}

/// Count the tokens of one chunk, stopping early if the phase is cancelled
pub fn map_chunk(lines: &[String], charset: WordCharset, cancel: &CancelFlag) -> CountMap {
    let mut counts = CountMap::new();
    for line in lines {
        if cancel.is_cancelled() {
            break;
        }
        count_line_into(&mut counts, line, charset);
    }
    counts
}
