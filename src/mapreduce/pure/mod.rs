//! Pure functional building blocks for word-count MapReduce
//!
//! Tokenization, partition planning and count aggregation, with no I/O or
//! threading, so each phase body can be tested in isolation.

pub mod aggregation;
pub mod partition;
pub mod tokenize;

pub use aggregation::{
    count_line_into, count_lines, merge_counts, rank_by_frequency, sum_key, sum_keys, top_n,
    total_count, union_keys, CountMap,
};
pub use partition::{chunk_bounds, partition_keys, partition_lines, MAX_PARTITIONS};
pub use tokenize::{token_count, tokenize, WordCharset};
