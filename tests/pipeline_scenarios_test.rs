//! End-to-end scenarios for the word-count pipeline

use mapcount::mapreduce::{MapReduceError, PhaseType, WordCharset, WordCountPipeline};
use mapcount::{run, run_sequential, CountMap};
use std::time::Duration;

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_two_line_scenario_with_two_threads() {
    let input = lines(&["The quick fox", "the QUICK brown fox"]);

    let (counts, _elapsed) = run(input.clone(), 2).await.unwrap().into_parts();
    let expected = CountMap::from([
        ("the".to_string(), 2),
        ("quick".to_string(), 2),
        ("fox".to_string(), 2),
        ("brown".to_string(), 1),
    ]);

    assert_eq!(counts, expected);
    assert_eq!(run_sequential(&input).counts, expected);
}

#[tokio::test]
async fn test_repeated_line_with_eight_threads() {
    let input = vec!["hello".to_string(); 1000];
    let output = run(input, 8).await.unwrap();

    assert_eq!(output.counts.len(), 1);
    assert_eq!(output.counts.get("hello"), Some(&1000));
    assert_eq!(output.timings.map.tasks, 8);
    assert_eq!(output.timings.reduce.tasks, 8);
}

#[tokio::test]
async fn test_more_threads_than_lines() {
    let input = lines(&["alpha beta", "beta"]);
    let output = run(input.clone(), 16).await.unwrap();

    assert_eq!(output.counts, run_sequential(&input).counts);
    assert_eq!(output.counts.get("beta"), Some(&2));
    assert_eq!(output.timings.map.tasks, 16);
}

#[tokio::test]
async fn test_more_threads_than_distinct_words() {
    let input = lines(&["a a a", "b", "a b", "c"]);
    let output = run(input, 10).await.unwrap();

    assert_eq!(output.counts.len(), 3);
    assert_eq!(output.counts.get("a"), Some(&4));
}

#[tokio::test]
async fn test_empty_input_yields_empty_mapping() {
    let output = run(Vec::<String>::new(), 4).await.unwrap();
    assert!(output.counts.is_empty());
    assert_eq!(output.total_words(), 0);
}

#[tokio::test]
async fn test_lines_without_tokens() {
    let input = lines(&["", "123 456", "   ", "!!! ???"]);
    let output = run(input, 3).await.unwrap();
    assert!(output.counts.is_empty());
}

#[tokio::test]
async fn test_single_thread_runs_one_task_per_phase() {
    let input = lines(&["one two", "three"]);
    let output = run(input, 1).await.unwrap();

    assert_eq!(output.timings.map.tasks, 1);
    assert_eq!(output.timings.reduce.tasks, 1);
    assert_eq!(output.unique_words(), 3);
}

#[tokio::test]
async fn test_zero_threads_is_rejected() {
    let err = run(lines(&["a b c"]), 0).await.unwrap_err();
    assert_eq!(err, MapReduceError::InvalidThreadCount { value: 0 });
    assert_eq!(err.user_message(), "Invalid thread count");
    assert!(err.phase().is_none());
}

#[tokio::test]
async fn test_top_n_breaks_ties_alphabetically() {
    let input = lines(&["a a a", "b b b b b", "c c c c c", "d"]);
    let output = run(input, 3).await.unwrap();

    assert_eq!(
        output.top(3),
        vec![
            ("b".to_string(), 5),
            ("c".to_string(), 5),
            ("a".to_string(), 3),
        ]
    );
    assert_eq!(output.ranked().len(), 4);
}

#[tokio::test]
async fn test_case_and_punctuation_folding() {
    let input = lines(&["Rust, rust; RUST!", "rust-lang"]);
    let output = run(input, 2).await.unwrap();

    assert_eq!(output.counts.get("rust"), Some(&4));
    assert_eq!(output.counts.get("lang"), Some(&1));
}

#[tokio::test]
async fn test_word_charset_keeps_digits_and_underscores() {
    let pipeline = WordCountPipeline::default().with_charset(WordCharset::Word);
    let input = lines(&["snake_case v2 V2", "snake_case"]);
    let comparison = pipeline.compare(input, 4).await.unwrap();

    assert!(comparison.counts_match());
    assert_eq!(comparison.concurrent.counts.get("snake_case"), Some(&2));
    assert_eq!(comparison.concurrent.counts.get("v2"), Some(&2));
}

#[tokio::test]
async fn test_generous_deadline_does_not_fire() {
    let pipeline = WordCountPipeline::default().with_phase_timeout(Some(Duration::from_secs(30)));
    let input: Vec<String> = (0..500).map(|i| format!("line {} of text", i)).collect();
    let output = pipeline.run(input, 6).await.unwrap();

    assert_eq!(output.counts.get("line"), Some(&500));
    assert_eq!(output.counts.get("text"), Some(&500));
}

#[tokio::test]
async fn test_large_input_across_thread_counts() {
    let words = ["lorem", "ipsum", "dolor", "sit", "amet"];
    let input: Vec<String> = (0..2_000)
        .map(|i| {
            (0..(i % 7 + 1))
                .map(|j| words[(i + j) % words.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    let expected = run_sequential(&input).counts;

    for threads in [1, 2, 4, 13, 64] {
        let output = run(input.clone(), threads).await.unwrap();
        assert_eq!(output.counts, expected, "threads = {}", threads);
    }
}

#[test]
fn test_phase_names() {
    assert_eq!(PhaseType::Map.to_string(), "Map");
    assert_eq!(PhaseType::Reduce.to_string(), "Reduce");
}
