//! Sequential baseline counter
//!
//! Single-pass, single-threaded word count. Serves as the reported
//! "single-threaded" timing and as the ground truth the concurrent pipeline
//! must reproduce.

use super::pure::{count_lines, CountMap, WordCharset};
use std::time::{Duration, Instant};
use tracing::debug;

/// Counts and elapsed time of a sequential run
#[derive(Debug, Clone, PartialEq)]
pub struct SequentialOutput {
    pub counts: CountMap,
    pub elapsed: Duration,
}

impl SequentialOutput {
    pub fn into_parts(self) -> (CountMap, Duration) {
        (self.counts, self.elapsed)
    }
}

/// Count every token of `lines` on the calling thread
pub fn count_sequential<S: AsRef<str>>(lines: &[S], charset: WordCharset) -> SequentialOutput {
    let start = Instant::now();
    let counts = count_lines(lines, charset);
    let elapsed = start.elapsed();
    debug!(
        "Sequential count: {} lines, {} unique words in {:?}",
        lines.len(),
        counts.len(),
        elapsed
    );
    SequentialOutput { counts, elapsed }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_scenario() {
        let output = count_sequential(
            &["The quick fox", "the QUICK brown fox"],
            WordCharset::Alphabetic,
        );
        let expected = CountMap::from([
            ("the".to_string(), 2),
            ("quick".to_string(), 2),
            ("fox".to_string(), 2),
            ("brown".to_string(), 1),
        ]);
        assert_eq!(output.counts, expected);
    }

    #[test]
    fn test_sequential_empty_input() {
        let lines: Vec<String> = Vec::new();
        let (counts, _elapsed) = count_sequential(&lines, WordCharset::Word).into_parts();
        assert!(counts.is_empty());
    }
}
