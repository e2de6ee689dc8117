//! Pure counting and aggregation functions
//!
//! The bodies of the Map, Shuffle, Reduce and Combine phases, free of any
//! threading so they can be tested and reused by the sequential baseline.

use super::tokenize::{tokenize, WordCharset};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Mapping of word to occurrence count
pub type CountMap = HashMap<String, u64>;

/// Pure: Accumulate the tokens of one line into `counts`
pub fn count_line_into(counts: &mut CountMap, line: &str, charset: WordCharset) {
    for word in tokenize(line, charset) {
        *counts.entry(word).or_insert(0) += 1;
    }
}

/// Pure: Count every token across a sequence of lines
pub fn count_lines<S: AsRef<str>>(lines: &[S], charset: WordCharset) -> CountMap {
    let mut counts = CountMap::new();
    for line in lines {
        count_line_into(&mut counts, line.as_ref(), charset);
    }
    counts
}

/// Pure: Union of the key sets of all partial maps, in ascending order
pub fn union_keys(partials: &[CountMap]) -> Vec<String> {
    partials
        .iter()
        .flat_map(|counts| counts.keys())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}

/// Pure: Sum one key across all partial maps; absent keys contribute zero
pub fn sum_key(partials: &[CountMap], key: &str) -> u64 {
    partials
        .iter()
        .filter_map(|counts| counts.get(key))
        .sum()
}

/// Pure: Sum every key of a group across all partial maps
pub fn sum_keys<K: AsRef<str>>(partials: &[CountMap], keys: &[K]) -> CountMap {
    keys.iter()
        .map(|key| {
            let key = key.as_ref();
            (key.to_string(), sum_key(partials, key))
        })
        .collect()
}

/// Pure: Merge count maps, adding counts for keys present in several maps
pub fn merge_counts<I>(maps: I) -> CountMap
where
    I: IntoIterator<Item = CountMap>,
{
    let mut merged = CountMap::new();
    for counts in maps {
        if merged.is_empty() {
            merged = counts;
            continue;
        }
        for (word, count) in counts {
            *merged.entry(word).or_insert(0) += count;
        }
    }
    merged
}

/// Pure: Sum of all counts in a map
pub fn total_count(counts: &CountMap) -> u64 {
    counts.values().sum()
}

/// Ordering used for ranked output: descending count, then ascending word
pub fn frequency_order(a: &(String, u64), b: &(String, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Pure: All (word, count) pairs ordered by descending frequency
pub fn rank_by_frequency(counts: &CountMap) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = counts
        .iter()
        .map(|(word, count)| (word.clone(), *count))
        .collect();
    ranked.sort_by(frequency_order);
    ranked
}

/// Pure: The `n` most frequent words
pub fn top_n(counts: &CountMap, n: usize) -> Vec<(String, u64)> {
    let mut ranked = rank_by_frequency(counts);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, u64)]) -> CountMap {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    #[test]
    fn test_count_lines() {
        let lines = vec!["The quick fox", "the QUICK brown fox"];
        let counts = count_lines(&lines, WordCharset::Alphabetic);
        assert_eq!(
            counts,
            map(&[("the", 2), ("quick", 2), ("fox", 2), ("brown", 1)])
        );
    }

    #[test]
    fn test_count_lines_empty() {
        let lines: Vec<&str> = vec![];
        assert!(count_lines(&lines, WordCharset::Alphabetic).is_empty());
        assert!(count_lines(&["", "  ", "123"], WordCharset::Alphabetic).is_empty());
    }

    #[test]
    fn test_union_keys_is_sorted_and_distinct() {
        let partials = vec![map(&[("b", 1), ("a", 2)]), map(&[("c", 1), ("a", 1)]), map(&[])];
        assert_eq!(union_keys(&partials), vec!["a", "b", "c"]);
        assert!(union_keys(&[]).is_empty());
    }

    #[test]
    fn test_sum_keys_treats_missing_as_zero() {
        let partials = vec![map(&[("a", 2), ("b", 1)]), map(&[("a", 3)]), map(&[])];
        assert_eq!(sum_key(&partials, "a"), 5);
        assert_eq!(sum_key(&partials, "b"), 1);
        assert_eq!(sum_key(&partials, "zzz"), 0);

        let reduced = sum_keys(&partials, &["a", "b"]);
        assert_eq!(reduced, map(&[("a", 5), ("b", 1)]));
    }

    #[test]
    fn test_merge_counts() {
        let merged = merge_counts(vec![map(&[("a", 1)]), map(&[("b", 2)]), map(&[("a", 4)])]);
        assert_eq!(merged, map(&[("a", 5), ("b", 2)]));
        assert!(merge_counts(Vec::<CountMap>::new()).is_empty());
    }

    #[test]
    fn test_rank_breaks_ties_lexically() {
        let counts = map(&[("a", 3), ("b", 5), ("c", 5), ("d", 1)]);
        let ranked = rank_by_frequency(&counts);
        assert_eq!(
            ranked,
            vec![
                ("b".to_string(), 5),
                ("c".to_string(), 5),
                ("a".to_string(), 3),
                ("d".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_top_n() {
        let counts = map(&[("a", 3), ("b", 5), ("c", 5), ("d", 1)]);
        assert_eq!(
            top_n(&counts, 2),
            vec![("b".to_string(), 5), ("c".to_string(), 5)]
        );
        assert_eq!(top_n(&counts, 10).len(), 4);
        assert!(top_n(&counts, 0).is_empty());
    }

    #[test]
    fn test_total_count() {
        assert_eq!(total_count(&map(&[("a", 3), ("b", 5)])), 8);
        assert_eq!(total_count(&CountMap::new()), 0);
    }
}
