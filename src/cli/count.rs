//! `mapcount count`: run both counters over a file and print the comparison

use crate::config::Config;
use crate::input::read_lines;
use crate::mapreduce::{Comparison, WordCharset, WordCountPipeline};
use crate::report::WordCountReport;
use anyhow::{anyhow, Context, Result};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;

/// Options of the `count` subcommand after merging flags over configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CountOptions {
    pub file: Option<PathBuf>,
    pub threads: usize,
    pub charset: WordCharset,
    pub top: usize,
    pub json: bool,
    pub timeout: Option<Duration>,
}

impl CountOptions {
    /// Command-line flags win over configured values
    pub fn resolve(
        config: &Config,
        file: Option<PathBuf>,
        threads: Option<usize>,
        charset: Option<WordCharset>,
        top: Option<usize>,
        json: bool,
        timeout: Option<Duration>,
    ) -> Self {
        Self {
            file,
            threads: threads.unwrap_or(config.pipeline.threads),
            charset: charset.unwrap_or(config.pipeline.charset),
            top: top.unwrap_or(config.pipeline.top_n),
            json,
            timeout: timeout.or(config.pipeline.phase_timeout),
        }
    }
}

pub async fn run_count(options: CountOptions) -> Result<()> {
    let path = match options.file.clone() {
        Some(path) => path,
        None => prompt_for_path().await?,
    };

    let lines = read_lines(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let pipeline = WordCountPipeline::default()
        .with_charset(options.charset)
        .with_phase_timeout(options.timeout);

    debug!(
        "Counting {} with {} threads ({} charset)",
        path.display(),
        options.threads,
        options.charset
    );

    let comparison = pipeline
        .compare(lines, options.threads)
        .await
        .map_err(|e| {
            debug!("Word count failed: {}", e);
            anyhow!(e.user_message())
        })?;

    let output = if options.json {
        let report = WordCountReport::from(comparison);
        format!("{}\n", serde_json::to_string_pretty(&report)?)
    } else {
        render_summary(&comparison, options.top)
    };
    print!("{}", output);
    Ok(())
}

async fn prompt_for_path() -> Result<PathBuf> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(b"Enter path to data file: ").await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    let path = line.trim();
    if path.is_empty() {
        return Err(anyhow!("No data file given"));
    }
    Ok(PathBuf::from(path))
}

/// Timings, unique-word counts, verdict and top-`top` ranking
pub fn render_summary(comparison: &Comparison, top: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Single-threaded: {:.6}s, {} unique words",
        comparison.sequential.elapsed.as_secs_f64(),
        comparison.sequential.counts.len()
    );
    let _ = writeln!(
        out,
        "Multi-threaded ({} threads): {:.6}s, {} unique words",
        comparison.concurrent.num_threads,
        comparison.concurrent.elapsed.as_secs_f64(),
        comparison.concurrent.unique_words()
    );
    let verdict = if comparison.counts_match() {
        "counts match"
    } else {
        "counts differ"
    };
    let _ = writeln!(out, "Result: {}", verdict);

    if top > 0 {
        out.push_str(&render_ranking(&comparison.concurrent.top(top)));
    }
    out
}

/// Numbered ranking with words padded to a common width
pub fn render_ranking(ranked: &[(String, u64)]) -> String {
    let width = ranked
        .iter()
        .map(|(word, _)| word.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    let _ = writeln!(out, "Top {} words:", ranked.len());
    for (rank, (word, count)) in ranked.iter().enumerate() {
        let _ = writeln!(out, "{:>4}. {:<width$}  {}", rank + 1, word, count, width = width);
    }
    out
}
