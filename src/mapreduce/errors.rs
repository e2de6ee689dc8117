//! Structured error types for word-count pipeline invocations
//!
//! Distinguishes constraint violations (rejected before any task is
//! scheduled) from task failures (which abort the whole invocation), and
//! carries enough context (phase, task index) to diagnose a failure without
//! leaking those internals to end users.

use super::phases::PhaseType;
use super::pure::MAX_PARTITIONS;
use std::time::Duration;
use thiserror::Error;

/// Main error type for pipeline operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapReduceError {
    // Constraint violations
    #[error("Invalid thread count {value}: must be between 1 and {}", MAX_PARTITIONS)]
    InvalidThreadCount { value: usize },

    #[error("Invalid partition count {value}: must be between 1 and {}", MAX_PARTITIONS)]
    InvalidPartitionCount { value: usize },

    // Task failures
    #[error("{phase} task {index} failed: {reason}")]
    TaskFailed {
        phase: PhaseType,
        index: usize,
        reason: String,
    },

    #[error("{phase} task was aborted before publishing: {reason}")]
    TaskAborted { phase: PhaseType, reason: String },

    #[error("Sequential count failed: {reason}")]
    SequentialFailed { reason: String },

    #[error("{phase} phase exceeded its deadline of {}", humantime::format_duration(*timeout))]
    PhaseTimeout { phase: PhaseType, timeout: Duration },

    // Slot discipline
    #[error("{phase} slot {index} was published twice")]
    SlotAlreadyPublished { phase: PhaseType, index: usize },

    #[error("{phase} slot {index} was never published")]
    MissingSlot { phase: PhaseType, index: usize },
}

impl MapReduceError {
    /// Whether the error was raised before any task was scheduled
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidThreadCount { .. } | Self::InvalidPartitionCount { .. }
        )
    }

    /// Phase the error originated in, if it came from a running phase
    pub fn phase(&self) -> Option<PhaseType> {
        match self {
            Self::TaskFailed { phase, .. }
            | Self::TaskAborted { phase, .. }
            | Self::PhaseTimeout { phase, .. }
            | Self::SlotAlreadyPublished { phase, .. }
            | Self::MissingSlot { phase, .. } => Some(*phase),
            Self::InvalidThreadCount { .. }
            | Self::InvalidPartitionCount { .. }
            | Self::SequentialFailed { .. } => None,
        }
    }

    /// Message safe to show at a request or CLI boundary.
    ///
    /// Never includes slot or task indices.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidThreadCount { .. } => "Invalid thread count".to_string(),
            Self::InvalidPartitionCount { .. } => "Invalid key-group count".to_string(),
            Self::PhaseTimeout { .. } => "Word count timed out".to_string(),
            _ => "Word count failed".to_string(),
        }
    }
}

/// Result alias for pipeline operations
pub type MapReduceResult<T> = std::result::Result<T, MapReduceError>;
