//! Events emitted while a turn runs.

use serde::Serialize;
use serde_json::Value;

/// Why a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DoneReason {
    /// The assistant produced a final text-only response.
    Completed,
    /// The step budget ran out; partial output stands.
    StepLimitReached,
}

/// Incremental output of one turn, in emission order.
///
/// Per tool call the ordering is fixed: `ToolCallStarted`, then
/// `ToolCallInput`, then exactly one of `ToolCallOutput` or
/// `ToolCallFailed`. Text deltas are flushed as produced, never buffered
/// into a whole message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// A fragment of assistant text.
    TextDelta { text: String },
    /// The engine requested a tool call.
    ToolCallStarted { id: String, name: String },
    /// The arguments the engine supplied for a call.
    ToolCallInput { id: String, arguments: Value },
    /// A tool call finished successfully.
    ToolCallOutput { id: String, output: Value },
    /// A tool call failed; the payload already went back to the model.
    ToolCallFailed { id: String, error: String },
    /// The turn aborted. Terminal.
    Error { message: String },
    /// The turn finished. Terminal.
    Done { reason: DoneReason },
}

impl AgentEvent {
    /// Stable wire name for this event, used as the SSE event name.
    pub fn name(&self) -> &'static str {
        match self {
            AgentEvent::TextDelta { .. } => "text_delta",
            AgentEvent::ToolCallStarted { .. } => "tool_call_started",
            AgentEvent::ToolCallInput { .. } => "tool_call_input",
            AgentEvent::ToolCallOutput { .. } => "tool_call_output",
            AgentEvent::ToolCallFailed { .. } => "tool_call_failed",
            AgentEvent::Error { .. } => "error",
            AgentEvent::Done { .. } => "done",
        }
    }
}
