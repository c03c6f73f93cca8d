//! Error types for feature extraction.

use std::fmt;

use arrow::error::ArrowError;

/// A single partition that failed during parallel extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionFailure {
    /// Index of the partition in table order.
    pub partition: usize,
    /// Human-readable cause (error message or panic payload).
    pub message: String,
}

impl fmt::Display for PartitionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "partition {}: {}", self.partition, self.message)
    }
}

/// Errors raised by the extraction engine.
///
/// `InvalidArgument` and `SchemaMismatch` are always raised before any worker
/// starts. `WorkerFailure` is raised only after every worker has been joined.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// A caller-supplied scalar parameter is outside its allowed domain.
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument { name: &'static str, message: String },

    /// Required columns are missing or have an incompatible type.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// One or more partitions failed; no partial output is returned.
    #[error("{} of {total} partitions failed: {}", .failures.len(), join_failures(.failures))]
    WorkerFailure {
        failures: Vec<PartitionFailure>,
        total: usize,
    },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// An Arrow kernel failed.
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
}

impl FeatureError {
    pub(crate) fn invalid_argument(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            message: message.into(),
        }
    }

    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::SchemaMismatch(message.into())
    }

    /// Returns `true` for errors detected before any work was scheduled.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::SchemaMismatch(_))
    }
}

fn join_failures(failures: &[PartitionFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, FeatureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_failure_lists_every_partition() {
        let err = FeatureError::WorkerFailure {
            failures: vec![
                PartitionFailure {
                    partition: 1,
                    message: "boom".into(),
                },
                PartitionFailure {
                    partition: 3,
                    message: "bad row".into(),
                },
            ],
            total: 4,
        };
        assert_eq!(
            err.to_string(),
            "2 of 4 partitions failed: partition 1: boom; partition 3: bad row"
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn invalid_argument_message() {
        let err = FeatureError::invalid_argument("n_threads", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "invalid argument 'n_threads': must be positive, got 0"
        );
        assert!(err.is_validation());
    }
}
