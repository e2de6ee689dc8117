use crate::mapreduce::errors::MapReduceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pipeline error: {0}")]
    MapReduce(#[from] MapReduceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Message safe to surface at a CLI or HTTP boundary
    pub fn user_message(&self) -> String {
        match self {
            Error::MapReduce(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapreduce::PhaseType;

    #[test]
    fn test_pipeline_failures_hide_details_from_users() {
        let err = Error::from(MapReduceError::TaskFailed {
            phase: PhaseType::Map,
            index: 5,
            reason: "worker panicked".to_string(),
        });
        assert_eq!(err.user_message(), "Word count failed");
        assert!(err.to_string().starts_with("Pipeline error:"));
    }

    #[test]
    fn test_other_errors_surface_their_display() {
        let err = Error::Config("pipeline.threads must be between 1 and 1024".to_string());
        assert_eq!(
            err.user_message(),
            "Configuration error: pipeline.threads must be between 1 and 1024"
        );
    }
}
