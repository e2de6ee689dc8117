use crate::mapreduce::Comparison;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of one sequential/concurrent comparison, as returned by the HTTP
/// endpoint and printed by `mapcount count --json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCountReport {
    /// Sequential elapsed time in seconds
    pub single_time: f64,
    /// Concurrent elapsed time in seconds
    pub multi_time: f64,
    pub threads: usize,
    pub unique_words: usize,
    /// Counts from the concurrent run, ordered by word
    pub counts: BTreeMap<String, u64>,
}

impl From<Comparison> for WordCountReport {
    fn from(comparison: Comparison) -> Self {
        let Comparison {
            sequential,
            concurrent,
        } = comparison;
        Self {
            single_time: sequential.elapsed.as_secs_f64(),
            multi_time: concurrent.elapsed.as_secs_f64(),
            threads: concurrent.num_threads,
            unique_words: concurrent.counts.len(),
            counts: concurrent.counts.into_iter().collect(),
        }
    }
}
