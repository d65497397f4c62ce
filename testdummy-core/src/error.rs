//! Error types for the simulation engine

use std::path::PathBuf;
use thiserror::Error;

/// Failure writing a frame to an output channel
#[derive(Error, Debug)]
pub enum SinkError {
    /// The receiving side went away, usually a disconnected client
    #[error("output channel closed")]
    Closed,
}

/// Stream emulator errors
#[derive(Error, Debug)]
pub enum StreamError {
    /// The transport cannot deliver frames incrementally
    #[error("Streaming unsupported")]
    StreamingUnsupported,

    #[error("Failed to encode chunk: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Termination diagnostic errors
#[derive(Error, Debug)]
pub enum TerminationError {
    #[error("Failed to write termination log {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Dependency health-check errors
#[derive(Error, Debug, Clone)]
pub enum CheckError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("unreachable: {0}")]
    Unreachable(String),

    #[error("timed out after {0:?}")]
    Timeout(std::time::Duration),
}
