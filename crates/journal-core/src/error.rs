//! Error types for engine and transcript operations.

use thiserror::Error;

/// Errors that can occur while talking to a completion engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine is misconfigured (missing key, bad URL).
    #[error("engine configuration error: {0}")]
    Configuration(String),

    /// A network-level failure reaching the engine.
    #[error("engine network error: {0}")]
    Network(String),

    /// The engine returned an error response.
    #[error("engine request failed: {0}")]
    Api(String),

    /// The engine's output could not be decoded.
    #[error("engine protocol error: {0}")]
    Protocol(String),

    /// The stream broke mid-response.
    #[error("engine stream error: {0}")]
    Stream(String),
}

/// Errors produced by transcript validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// A turn carried a role outside the recognized set.
    #[error("turn {index} has an unrecognized role")]
    UnrecognizedRole { index: usize },

    /// A turn had no content parts.
    #[error("turn {index} has no content parts")]
    EmptyTurn { index: usize },

    /// A text part was empty.
    #[error("turn {index} contains an empty text part")]
    EmptyText { index: usize },

    /// A tool invocation part was missing its call id or tool name.
    #[error("turn {index} contains a tool invocation without {field}")]
    IncompleteToolInvocation { index: usize, field: &'static str },
}
