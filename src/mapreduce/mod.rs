//! Concurrent word-frequency counting
//!
//! A four-phase Map → Shuffle → Reduce → Combine pipeline whose result is
//! identical to a sequential count of the same input for every thread count
//! of at least one.
//!
//! ```ignore
//! let lines = vec!["The quick fox".to_string(), "the QUICK brown fox".to_string()];
//! let output = mapcount::mapreduce::run(lines.clone(), 2).await?;
//! assert_eq!(output.counts, mapcount::mapreduce::run_sequential(&lines).counts);
//! ```

pub mod errors;
pub mod orchestrator;
pub mod phases;
pub mod pure;
pub mod sequential;

pub use errors::{MapReduceError, MapReduceResult};
pub use orchestrator::{
    run, run_sequential, validate_thread_count, Comparison, PipelineOutput, WordCountPipeline,
    MAX_THREADS,
};
pub use phases::{PhaseMetrics, PhaseTimings, PhaseType};
pub use pure::{CountMap, WordCharset};
pub use sequential::{count_sequential, SequentialOutput};
