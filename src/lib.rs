//! # mapcount
//!
//! Concurrent word-frequency counting in four phases (Map, Shuffle, Reduce,
//! Combine) with a sequential baseline to check the result against.
//!
//! ## Usage
//!
//! ```bash
//! mapcount count --file book.txt --threads 8 --top 10
//! mapcount serve --bind 127.0.0.1:5000
//! ```
//!
//! ## Modules
//!
//! - `mapreduce` - Tokenizer, partitioner, the four phases and the orchestrator
//! - `config` - TOML configuration with environment overrides
//! - `input` - File decoding with a Latin-1 fallback
//! - `report` - Serializable comparison of the sequential and concurrent runs
//! - `server` - HTTP upload endpoint
//! - `cli` - Command-line driver
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod mapreduce;
pub mod report;
pub mod server;

pub use error::{Error, Result};
pub use mapreduce::{
    run, run_sequential, CountMap, MapReduceError, PipelineOutput, WordCharset,
    WordCountPipeline,
};
pub use report::WordCountReport;
