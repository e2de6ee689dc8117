//! Command routing and execution

use crate::cli::args::Commands;
use crate::cli::count::{run_count, CountOptions};
use crate::config::{Config, ConfigLoader};
use crate::mapreduce::WordCountPipeline;
use crate::server::ApiServer;
use anyhow::Result;
use std::path::PathBuf;

/// Load configuration from `config_path` (or the default locations)
pub async fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    Ok(ConfigLoader::new().with_path(config_path).load().await?)
}

/// Execute a CLI command based on the parsed arguments
pub async fn execute_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Count {
            file,
            threads,
            charset,
            top,
            json,
            timeout,
        } => {
            let options =
                CountOptions::resolve(&config, file, threads, charset, top, json, timeout);
            run_count(options).await
        }
        Commands::Serve { bind, static_dir } => {
            let mut server_config = config.server.clone();
            if let Some(bind) = bind {
                server_config.bind = bind;
            }
            if static_dir.is_some() {
                server_config.static_dir = static_dir;
            }
            let pipeline = WordCountPipeline::new(&config.pipeline);
            ApiServer::new(pipeline, &server_config).start().await
        }
    }
}
