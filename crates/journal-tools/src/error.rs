//! Error types for tool parsing and execution.

use thiserror::Error;

/// Errors that can occur while parsing or executing a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The model requested a tool that does not exist.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Missing required parameter.
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Numeric parameter outside its allowed range.
    #[error("Parameter '{name}' out of range: {actual} (allowed {min}..={max})")]
    OutOfRange {
        name: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },

    /// JSON serialization failed while building a payload.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] database::DatabaseError),
}
