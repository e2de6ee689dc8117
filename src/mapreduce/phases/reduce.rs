//! Reduce phase executor for word-count MapReduce
//!
//! Splits the sorted key set into one contiguous group per task. Each task
//! sums its keys across every partial map (not just one), so the partial maps
//! are shared read-only between all tasks while each key group is owned by
//! exactly one task.

use super::{run_parallel_phase, CancelFlag, PhaseMetrics, PhaseType};
use crate::mapreduce::errors::MapReduceResult;
use crate::mapreduce::pure::{partition_keys, sum_key, CountMap};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Output of the reduce phase: one reduced map per key group, by group index
#[derive(Debug, Clone)]
pub struct ReduceOutput {
    pub reduced: Vec<CountMap>,
    pub metrics: PhaseMetrics,
}

/// Executor for the reduce phase
#[derive(Debug, Clone)]
pub struct ReducePhase {
    deadline: Option<Duration>,
}

impl ReducePhase {
    /// Create a new reduce phase executor
    pub fn new(deadline: Option<Duration>) -> Self {
        Self { deadline }
    }

    /// Run one summing task per key group and wait for all of them to publish
    pub async fn execute(
        &self,
        partials: Arc<Vec<CountMap>>,
        keys: &[String],
        num_groups: usize,
    ) -> MapReduceResult<ReduceOutput> {
        let start = Instant::now();
        let groups = partition_keys(keys, num_groups)?;
        debug!(
            "Reduce phase: {} keys across {} groups",
            keys.len(),
            groups.len()
        );

        let tasks: Vec<_> = groups
            .into_iter()
            .map(|group| {
                let partials = Arc::clone(&partials);
                move |cancel: &CancelFlag| reduce_group(&partials, &group, cancel)
            })
            .collect();

        let reduced = run_parallel_phase(PhaseType::Reduce, tasks, self.deadline).await?;

        let metrics = PhaseMetrics {
            duration: start.elapsed(),
            tasks: reduced.len(),
            keys: reduced.iter().map(|counts| counts.len()).sum(),
        };
        debug!(
            "Reduce phase completed: {} reduced maps in {:?}",
            reduced.len(),
            metrics.duration
        );

        Ok(ReduceOutput { reduced, metrics })
    }
}

/// Sum each key of a group across all partial maps
///
/// Stops early if the phase is cancelled.
pub fn reduce_group(partials: &[CountMap], keys: &[String], cancel: &CancelFlag) -> CountMap {
    let mut reduced = CountMap::with_capacity(keys.len());
    for key in keys {
        if cancel.is_cancelled() {
            break;
        }
        reduced.insert(key.clone(), sum_key(partials, key));
    }
    reduced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partials() -> Arc<Vec<CountMap>> {
        Arc::new(vec![
            CountMap::from([("a".to_string(), 2), ("b".to_string(), 1)]),
            CountMap::from([("b".to_string(), 4), ("c".to_string(), 1)]),
            CountMap::new(),
        ])
    }

    fn keys() -> Vec<String> {
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    }

    #[tokio::test]
    async fn test_groups_sum_across_all_partials() {
        let output = ReducePhase::new(None)
            .execute(partials(), &keys(), 2)
            .await
            .unwrap();

        assert_eq!(output.reduced.len(), 2);
        // Group 0 holds "a", group 1 absorbs the remainder
        assert_eq!(output.reduced[0], CountMap::from([("a".to_string(), 2)]));
        assert_eq!(
            output.reduced[1],
            CountMap::from([("b".to_string(), 5), ("c".to_string(), 1)])
        );
    }

    #[tokio::test]
    async fn test_more_groups_than_keys() {
        let output = ReducePhase::new(None)
            .execute(partials(), &keys(), 7)
            .await
            .unwrap();

        assert_eq!(output.reduced.len(), 7);
        assert_eq!(output.metrics.keys, 3);
        assert!(output.reduced[3..].iter().all(|r| r.is_empty()));
    }

    #[tokio::test]
    async fn test_no_keys() {
        let output = ReducePhase::new(None)
            .execute(Arc::new(Vec::new()), &[], 3)
            .await
            .unwrap();
        assert_eq!(output.reduced.len(), 3);
        assert!(output.reduced.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn test_reduce_group_missing_key_counts_zero() {
        let cancel = CancelFlag::new();
        let reduced = reduce_group(&partials(), &["zzz".to_string()], &cancel);
        assert_eq!(reduced.get("zzz"), Some(&0));
    }
}
