//! CLI argument structures

use crate::mapreduce::WordCharset;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Count word frequencies sequentially and with a concurrent map/reduce pipeline
#[derive(Parser)]
#[command(name = "mapcount")]
#[command(about = "mapcount - Concurrent word-frequency counting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count the words of a file and compare against the sequential baseline
    #[command(name = "count")]
    Count {
        /// Text file to count (prompted for when omitted)
        #[arg(short = 'f', long)]
        file: Option<PathBuf>,

        /// Number of Map and Reduce tasks
        #[arg(short = 't', long)]
        threads: Option<usize>,

        /// Which characters make up a word
        #[arg(long, value_enum)]
        charset: Option<WordCharset>,

        /// Number of most frequent words to print
        #[arg(short = 'n', long)]
        top: Option<usize>,

        /// Print the full report as JSON instead of the ranking
        #[arg(long)]
        json: bool,

        /// Deadline for each concurrent phase (e.g. "30s", "2m")
        #[arg(long, value_parser = humantime::parse_duration)]
        timeout: Option<Duration>,
    },

    /// Serve the word-count HTTP API
    #[command(name = "serve")]
    Serve {
        /// Address to listen on
        #[arg(short = 'b', long)]
        bind: Option<String>,

        /// Directory of static files served at the root
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}
