//! # Engine Errors
//!
//! Failures at the external-engine boundary. The harness has no recovery
//! policy: the originating engine's message is carried verbatim and tagged
//! with the problem that produced it at the reporting layer.

use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from executing a query against an external engine
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The client command could not be started
    #[error("Failed to spawn engine client '{command}': {detail}")]
    Spawn { command: String, detail: String },

    /// The engine client exited non-zero; stderr is passed through verbatim
    #[error("Engine reported an error (exit code {code}): {stderr}")]
    Engine { code: i32, stderr: String },

    /// The engine produced output the adapter could not decode
    #[error("Could not decode engine output: {detail}")]
    Decode { detail: String },

    /// No adapter is configured for the backend
    #[error("No engine configured for backend '{backend}'")]
    Unavailable { backend: String },
}
