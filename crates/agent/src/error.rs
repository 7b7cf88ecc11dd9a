//! Agent error types.

use thiserror::Error;

/// Errors that abort a turn.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The completion engine failed (request setup or mid-stream).
    #[error("engine error: {0}")]
    Engine(#[from] journal_core::EngineError),

    /// The store failed outside of tool execution.
    #[error("database error: {0}")]
    Database(#[from] database::DatabaseError),

    /// The engine produced no usable text where some was required.
    #[error("empty completion: {0}")]
    EmptyCompletion(String),
}
