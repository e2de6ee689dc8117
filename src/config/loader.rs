use super::{get_global_config_path, Config, CONFIG_FILE_NAME};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Resolves and loads the configuration file
///
/// Lookup order: an explicit path, then `mapcount.toml` in the search
/// directory, then the per-user config file. Without any file the defaults
/// apply. Environment overrides are merged last.
pub struct ConfigLoader {
    explicit: Option<PathBuf>,
    search_dir: PathBuf,
    global: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            explicit: None,
            search_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            global: get_global_config_path(),
        }
    }

    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = dir.into();
        self
    }

    pub fn with_global_path(mut self, path: Option<PathBuf>) -> Self {
        self.global = path;
        self
    }

    /// The file that would be loaded, if any
    pub fn resolve_path(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.explicit {
            if !path.exists() {
                return Err(Error::NotFound(format!(
                    "config file {}",
                    path.display()
                )));
            }
            return Ok(Some(path.clone()));
        }

        let local = self.search_dir.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Ok(Some(local));
        }

        Ok(self.global.clone().filter(|path| path.exists()))
    }

    /// Load the file (if any), merge process environment overrides and validate
    pub async fn load(&self) -> Result<Config> {
        self.load_with_env(|key| std::env::var(key).ok()).await
    }

    pub async fn load_with_env<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match self.resolve_path()? {
            Some(path) => load_file(&path).await?,
            None => {
                debug!("No configuration file found, using defaults");
                Config::new()
            }
        };

        config.merge_env_from(lookup)?;
        config.validate()?;
        Ok(config)
    }
}

async fn load_file(path: &Path) -> Result<Config> {
    debug!("Loading configuration from {}", path.display());
    let content = fs::read_to_string(path).await?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}
