//! Error types for the emitter and its configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`TapEmitter`](crate::TapEmitter) operations.
#[derive(Debug, Error)]
pub enum TapError {
    /// Writing to the output sink failed.
    #[error("failed to write TAP output: {0}")]
    Io(#[from] std::io::Error),

    /// The driver called the emitter out of lifecycle order.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// The stream was already closed by `finish`.
    #[error("TAP stream already finished")]
    Finished,
}

impl TapError {
    pub(crate) fn violation(message: impl Into<String>) -> Self {
        Self::ProtocolViolation(message.into())
    }
}

/// Errors that can occur while loading an [`EmitterConfig`](crate::EmitterConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
