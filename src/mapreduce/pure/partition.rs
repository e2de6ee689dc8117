//! Pure partition planning for the Map and Reduce phases
//!
//! Both phases use the same contiguous-split policy: `n` ranges of roughly
//! equal size, the last one absorbing any remainder. When there are more
//! partitions than items, each leading partition holds a single item and the
//! trailing partitions are empty. Partitions are never omitted, so slot
//! indices always line up with task indices.

use crate::mapreduce::errors::{MapReduceError, MapReduceResult};
use std::ops::Range;

/// Largest number of partitions (and so of tasks per parallel phase)
pub const MAX_PARTITIONS: usize = 1024;

/// Pure: Compute the `n` contiguous index ranges covering `0..len`
///
/// `n` must be in `1..=MAX_PARTITIONS`.
///
/// This function is pure and deterministic - same inputs always produce same outputs.
pub fn chunk_bounds(len: usize, n: usize) -> MapReduceResult<Vec<Range<usize>>> {
    if n == 0 || n > MAX_PARTITIONS {
        return Err(MapReduceError::InvalidPartitionCount { value: n });
    }

    let size = (len / n).max(1);
    let bounds = (0..n)
        .map(|i| {
            let start = (i * size).min(len);
            let end = if i == n - 1 {
                len
            } else {
                ((i + 1) * size).min(len)
            };
            start..end
        })
        .collect();

    Ok(bounds)
}

/// Pure: Split an ordered line sequence into exactly `n` chunks
pub fn partition_lines<T>(lines: &[T], n: usize) -> MapReduceResult<Vec<&[T]>> {
    Ok(chunk_bounds(lines.len(), n)?
        .into_iter()
        .map(|range| &lines[range])
        .collect())
}

/// Pure: Sort a key set and split it into exactly `n` key groups
///
/// Sorting first makes the group assignment reproducible regardless of the
/// order the keys were collected in.
pub fn partition_keys<K: Ord + Clone>(keys: &[K], n: usize) -> MapReduceResult<Vec<Vec<K>>> {
    let bounds = chunk_bounds(keys.len(), n)?;

    let mut sorted = keys.to_vec();
    sorted.sort();

    Ok(bounds
        .into_iter()
        .map(|range| sorted[range].to_vec())
        .collect())
}
