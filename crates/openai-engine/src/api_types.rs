//! OpenAI-compatible chat-completions wire types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A chat message on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ApiMessage {
    /// Role: "system", "user", "assistant", or "tool".
    pub role: String,
    /// Message content (null for assistant tool-call messages).
    pub content: Option<String>,
    /// Tool calls attached to an assistant message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ApiToolCall>>,
    /// Call id a tool message answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// A completed tool call echoed back to the API.
#[derive(Debug, Clone, Serialize)]
pub struct ApiToolCall {
    pub id: String,
    /// Always "function".
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: ApiFunctionCall,
}

/// The function half of a tool call. Arguments are a JSON-encoded string
/// on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct ApiFunctionCall {
    pub name: String,
    pub arguments: String,
}

/// A tool advertised in the request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiTool {
    /// Always "function".
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: ApiFunctionDef,
}

/// Function schema for an advertised tool.
#[derive(Debug, Clone, Serialize)]
pub struct ApiFunctionDef {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Chat completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model to use.
    pub model: String,
    /// Messages in the conversation.
    pub messages: Vec<ApiMessage>,
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Tools to make available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ApiTool>>,
    /// Always true: responses arrive as SSE chunks.
    pub stream: bool,
}

/// One streamed chunk of a chat completion.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionChunk {
    pub choices: Vec<ChunkChoice>,
}

/// A choice within a streamed chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkChoice {
    pub delta: ChunkDelta,
    pub finish_reason: Option<String>,
}

/// The incremental payload of a chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChunkDelta {
    /// Text fragment, if any.
    pub content: Option<String>,
    /// Tool-call fragments, keyed by index across chunks.
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

/// One fragment of a tool call. The id and name arrive on the first
/// fragment for an index; argument text arrives in pieces.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallDelta {
    pub index: usize,
    pub id: Option<String>,
    pub function: Option<FunctionDelta>,
}

/// Fragment of the function half of a tool call.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionDelta {
    pub name: Option<String>,
    pub arguments: Option<String>,
}

/// API error response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorDetails,
}

/// API error details.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetails {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}
