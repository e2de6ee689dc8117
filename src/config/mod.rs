use crate::error::{Error, Result};
use crate::mapreduce::pure::WordCharset;
use crate::mapreduce::MAX_THREADS;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub mod loader;

pub use loader::ConfigLoader;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "mapcount.toml";

/// Get the per-user configuration file location
pub fn get_global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "mapcount", "mapcount")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub pipeline: PipelineConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Map and Reduce task count
    pub threads: usize,
    pub charset: WordCharset,
    /// Per-phase deadline; no deadline when unset
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub phase_timeout: Option<Duration>,
    /// Length of the ranked list printed by the CLI
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub static_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            threads: 4,
            charset: WordCharset::default(),
            phase_timeout: None,
            top_n: 20,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            static_dir: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_env_from(|key| std::env::var(key).ok())
    }

    /// Apply `MAPCOUNT_*` overrides read through `lookup`
    pub fn merge_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(threads) = lookup("MAPCOUNT_THREADS") {
            self.pipeline.threads = threads.trim().parse().map_err(|_| {
                Error::Config(format!("MAPCOUNT_THREADS is not a number: {}", threads))
            })?;
        }

        if let Some(charset) = lookup("MAPCOUNT_CHARSET") {
            self.pipeline.charset = charset.parse().map_err(Error::Config)?;
        }

        if let Some(timeout) = lookup("MAPCOUNT_PHASE_TIMEOUT") {
            let timeout = humantime::parse_duration(timeout.trim()).map_err(|e| {
                Error::Config(format!("MAPCOUNT_PHASE_TIMEOUT is invalid: {}", e))
            })?;
            self.pipeline.phase_timeout = Some(timeout);
        }

        if let Some(bind) = lookup("MAPCOUNT_BIND") {
            self.server.bind = bind;
        }

        if let Some(log_level) = lookup("MAPCOUNT_LOG_LEVEL") {
            self.log_level = Some(log_level);
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.pipeline.threads == 0 || self.pipeline.threads > MAX_THREADS {
            return Err(Error::Config(format!(
                "pipeline.threads must be between 1 and {}",
                MAX_THREADS
            )));
        }
        if self.pipeline.phase_timeout == Some(Duration::ZERO) {
            return Err(Error::Config(
                "pipeline.phase_timeout must be greater than zero".to_string(),
            ));
        }
        if self.server.bind.trim().is_empty() {
            return Err(Error::Config("server.bind must not be empty".to_string()));
        }
        Ok(())
    }
}
