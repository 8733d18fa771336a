//! Error types for the engine worker

use thiserror::Error;

/// Errors that can occur while driving the engine worker
#[derive(Error, Debug)]
pub enum WorkerError {
    /// The terminology index could not be built, even from the embedded set
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// The engine reported an error for a request
    #[error("Engine error: {0}")]
    Engine(String),

    /// A protocol line could not be decoded or encoded
    #[error("Protocol error: {0}")]
    Protocol(#[from] serde_json::Error),

    /// The worker task is gone
    #[error("Worker channel closed")]
    ChannelClosed,

    /// The worker task panicked or was aborted
    #[error("Worker task failed: {0}")]
    Join(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
