//! Errors reported by the log pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for log pipeline operations.
pub type Result<T> = std::result::Result<T, LogError>;

/// Errors reported by the log pipeline.
///
/// Only failures that happen before the pipeline is running (configuration,
/// the initial file open) and lifecycle failures at shutdown are reported.
/// Write and rotation failures inside the consumer task are absorbed there.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Invalid output mode {0:?}: expected \"stdio\" or \"file\"")]
    InvalidMode(String),

    #[error("Directory path not specified for file output")]
    MissingDirectory,

    #[error("Failed to open log file {}: {source}", .path.display())]
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Log consumer task failed: {0}")]
    ConsumerFailed(#[from] tokio::task::JoinError),

    #[error("Timed out draining the log queue with {pending} records still pending")]
    DrainTimeout { pending: u64 },
}
