//! Pipeline orchestrator
//!
//! Drives Map → Shuffle → Reduce → Combine for one invocation. All
//! intermediate state (chunks, partial maps, key groups, reduced maps) is
//! created here and dropped once the final mapping is returned; nothing is
//! shared between invocations.

use super::errors::{MapReduceError, MapReduceResult};
use super::phases::{
    CombinePhase, MapPhase, PhaseTimings, PhaseType, ReducePhase, ShufflePhase,
};
use super::pure::{rank_by_frequency, top_n, total_count, CountMap, WordCharset, MAX_PARTITIONS};
use super::sequential::{count_sequential, SequentialOutput};
use crate::config::PipelineConfig;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of a concurrent pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Final word → count mapping
    pub counts: CountMap,
    /// Wall-clock time of the whole invocation
    pub elapsed: Duration,
    /// Worker count used for Map and Reduce
    pub num_threads: usize,
    pub timings: PhaseTimings,
}

impl PipelineOutput {
    pub fn into_parts(self) -> (CountMap, Duration) {
        (self.counts, self.elapsed)
    }

    pub fn unique_words(&self) -> usize {
        self.counts.len()
    }

    pub fn total_words(&self) -> u64 {
        total_count(&self.counts)
    }

    /// Counts ordered by descending frequency, ties by ascending word
    pub fn ranked(&self) -> Vec<(String, u64)> {
        rank_by_frequency(&self.counts)
    }

    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        top_n(&self.counts, n)
    }
}

/// Both runs over the same input, for reporting side by side
#[derive(Debug, Clone)]
pub struct Comparison {
    pub sequential: SequentialOutput,
    pub concurrent: PipelineOutput,
}

impl Comparison {
    /// Whether the concurrent result reproduced the sequential baseline
    pub fn counts_match(&self) -> bool {
        self.sequential.counts == self.concurrent.counts
    }
}

/// Largest accepted thread count
pub const MAX_THREADS: usize = MAX_PARTITIONS;

/// Reject thread counts outside `1..=MAX_THREADS` before anything is scheduled
pub fn validate_thread_count(num_threads: usize) -> MapReduceResult<usize> {
    if num_threads == 0 || num_threads > MAX_THREADS {
        return Err(MapReduceError::InvalidThreadCount { value: num_threads });
    }
    Ok(num_threads)
}

/// Concurrent word-count pipeline with a sequential baseline
#[derive(Debug, Clone, Default)]
pub struct WordCountPipeline {
    charset: WordCharset,
    phase_timeout: Option<Duration>,
}

impl WordCountPipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            charset: config.charset,
            phase_timeout: config.phase_timeout,
        }
    }

    pub fn with_charset(mut self, charset: WordCharset) -> Self {
        self.charset = charset;
        self
    }

    pub fn with_phase_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.phase_timeout = timeout;
        self
    }

    pub fn charset(&self) -> WordCharset {
        self.charset
    }

    /// Baseline single-threaded count
    pub fn run_sequential<S: AsRef<str>>(&self, lines: &[S]) -> SequentialOutput {
        count_sequential(lines, self.charset)
    }

    /// Run the four phases with `num_threads` Map and Reduce tasks
    ///
    /// Reduce starts only after every Map task has published, and Combine
    /// only after every Reduce task has published.
    pub async fn run(
        &self,
        lines: impl Into<Arc<[String]>>,
        num_threads: usize,
    ) -> MapReduceResult<PipelineOutput> {
        let num_threads = validate_thread_count(num_threads)?;
        let lines: Arc<[String]> = lines.into();
        let start = Instant::now();
        let mut timings = PhaseTimings::default();

        let map = MapPhase::new(self.charset, self.phase_timeout)
            .execute(Arc::clone(&lines), num_threads)
            .await?;
        timings.record(PhaseType::Map, map.metrics);

        let shuffle = ShufflePhase::new().execute(&map.partials);
        timings.record(PhaseType::Shuffle, shuffle.metrics);

        let partials = Arc::new(map.partials);
        let reduce = ReducePhase::new(self.phase_timeout)
            .execute(partials, &shuffle.keys, num_threads)
            .await?;
        timings.record(PhaseType::Reduce, reduce.metrics);

        let combine = CombinePhase::new().execute(reduce.reduced);
        timings.record(PhaseType::Combine, combine.metrics);

        let elapsed = start.elapsed();
        info!(
            "Word count finished: {} lines, {} threads, {} unique words in {:?}",
            lines.len(),
            num_threads,
            combine.counts.len(),
            elapsed
        );

        Ok(PipelineOutput {
            counts: combine.counts,
            elapsed,
            num_threads,
            timings,
        })
    }

    /// Run the sequential baseline and then the concurrent pipeline
    ///
    /// The baseline runs on the blocking pool so it does not stall the
    /// async worker that awaits it.
    pub async fn compare(
        &self,
        lines: impl Into<Arc<[String]>>,
        num_threads: usize,
    ) -> MapReduceResult<Comparison> {
        validate_thread_count(num_threads)?;
        let lines: Arc<[String]> = lines.into();

        let baseline = Arc::clone(&lines);
        let charset = self.charset;
        let sequential =
            tokio::task::spawn_blocking(move || count_sequential(&baseline[..], charset))
                .await
                .map_err(|e| MapReduceError::SequentialFailed {
                    reason: e.to_string(),
                })?;

        let concurrent = self.run(lines, num_threads).await?;
        Ok(Comparison {
            sequential,
            concurrent,
        })
    }
}

/// Run the concurrent pipeline with the default configuration
pub async fn run(
    lines: impl Into<Arc<[String]>>,
    num_threads: usize,
) -> MapReduceResult<PipelineOutput> {
    WordCountPipeline::default().run(lines, num_threads).await
}

/// Run the sequential baseline with the default configuration
pub fn run_sequential<S: AsRef<str>>(lines: &[S]) -> SequentialOutput {
    WordCountPipeline::default().run_sequential(lines)
}
