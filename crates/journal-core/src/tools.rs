//! Tool invocation plumbing shared between the agent loop and the tool layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request from the completion engine to execute a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// Unique id for this call, assigned by the engine.
    pub id: String,
    /// Name of the tool to execute.
    pub name: String,
    /// Arguments as a JSON object.
    pub arguments: Value,
}

/// The result of a tool execution, fed back to the engine as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// The call id this result corresponds to.
    pub tool_call_id: String,
    /// Structured payload returned to the model.
    pub payload: Value,
    /// Whether the execution succeeded.
    pub success: bool,
}

impl ToolResult {
    /// Create a successful result.
    pub fn success(tool_call_id: impl Into<String>, payload: Value) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            payload,
            success: true,
        }
    }

    /// Create a failed result. The error becomes structured data the model
    /// can explain to the user; it never aborts the loop.
    pub fn error(tool_call_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_call_id: tool_call_id.into(),
            payload: serde_json::json!({
                "success": false,
                "error": message.into(),
            }),
            success: false,
        }
    }
}
