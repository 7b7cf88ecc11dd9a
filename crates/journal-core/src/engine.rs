//! The completion-engine boundary.
//!
//! The engine is a black box: it consumes system instructions, a running
//! message list, and a set of tool definitions, and yields an incremental
//! stream of text deltas and tool-call requests. The agent loop drives it;
//! implementations live in their own crates (see `openai-engine`).

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::EngineError;
use crate::tools::ToolCallRequest;

/// A message submitted to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineMessage {
    /// Role: "system", "user", "assistant", or "tool".
    pub role: String,
    /// Message content.
    pub content: String,
    /// Tool calls attached to an assistant message, if any.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tool_calls: Vec<ToolCallRequest>,
    /// Call id a tool message answers, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl EngineMessage {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::plain("system", content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::plain("user", content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain("assistant", content)
    }

    /// Create an assistant message that carries tool calls.
    pub fn assistant_tool_calls(content: impl Into<String>, calls: Vec<ToolCallRequest>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
            tool_calls: calls,
            tool_call_id: None,
        }
    }

    /// Create a tool-result message answering a specific call.
    pub fn tool(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(call_id.into()),
        }
    }

    fn plain(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

/// A tool the engine may request, described as a JSON schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool's unique name (used for dispatch).
    pub name: String,
    /// Natural-language description the engine uses to decide when to call it.
    pub description: String,
    /// JSON Schema for the input arguments.
    pub parameters: Value,
}

/// One completion request: instructions + running transcript + tool set.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub messages: Vec<EngineMessage>,
    pub tools: Vec<ToolDefinition>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Why a completion round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The engine produced a final text-only response.
    Stop,
    /// The engine wants the listed tool calls executed.
    ToolCalls,
}

/// Incremental output from one completion round.
#[derive(Debug, Clone)]
pub enum CompletionEvent {
    /// A fragment of assistant text, in emission order.
    TextDelta(String),
    /// A fully-assembled tool-call request.
    ToolCall(ToolCallRequest),
    /// The round is over.
    Finished(FinishReason),
}

/// The incremental event stream for one completion round.
pub type CompletionStream = BoxStream<'static, Result<CompletionEvent, EngineError>>;

/// Trait for completion backends.
///
/// Implementations must flush text deltas as they are produced (no
/// buffering the whole response) and must emit every tool call before
/// `Finished(ToolCalls)`.
#[async_trait]
pub trait CompletionEngine: Send + Sync {
    /// Start one completion round and return its event stream.
    async fn stream(&self, request: CompletionRequest) -> Result<CompletionStream, EngineError>;
}
