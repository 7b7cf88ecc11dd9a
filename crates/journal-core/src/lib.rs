//! Core traits and types for the journaling assistant.
//!
//! This crate provides the shared vocabulary for the rest of the workspace:
//!
//! - [`ChatTurn`] / [`Part`] / [`Role`] - The transcript model persisted per session
//! - [`CompletionEngine`] - The trait every completion backend implements
//! - [`CompletionEvent`] - Incremental engine output (text deltas, tool calls)
//! - [`ToolCallRequest`] / [`ToolResult`] - Tool invocation plumbing
//! - [`dates`] - Pure calendar-date helpers and streak computation
//!
//! # Example
//!
//! ```rust
//! use journal_core::{ChatTurn, validate_transcript};
//!
//! let transcript = vec![
//!     ChatTurn::user("I had a great day at work today"),
//!     ChatTurn::assistant("That sounds meaningful. I've saved it for you."),
//! ];
//! assert!(validate_transcript(&transcript).is_ok());
//! ```

pub mod dates;
mod engine;
mod error;
mod transcript;
mod tools;

pub use engine::{
    CompletionEngine, CompletionEvent, CompletionRequest, CompletionStream, EngineMessage,
    FinishReason, ToolDefinition,
};
pub use error::{EngineError, TranscriptError};
pub use tools::{ToolCallRequest, ToolResult};
pub use transcript::{validate_transcript, ChatTurn, Part, Role};

// Re-export async_trait for implementors
pub use async_trait::async_trait;
