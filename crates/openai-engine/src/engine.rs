//! Streaming completion engine over an OpenAI-compatible API.

use std::collections::BTreeMap;

use futures_util::StreamExt;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

use journal_core::{
    async_trait, CompletionEngine, CompletionEvent, CompletionRequest, CompletionStream,
    EngineError, EngineMessage, FinishReason, ToolCallRequest,
};

use crate::api_types::{
    ApiError, ApiFunctionCall, ApiFunctionDef, ApiMessage, ApiTool, ApiToolCall,
    ChatCompletionChunk, ChatCompletionRequest,
};
use crate::config::EngineConfig;

/// Completion engine speaking the OpenAI chat-completions protocol with
/// `stream: true`.
#[derive(Debug, Clone)]
pub struct OpenAiEngine {
    client: reqwest::Client,
    config: EngineConfig,
}

impl OpenAiEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create an engine from environment variables.
    pub fn from_env() -> Result<Self, EngineError> {
        Ok(Self::new(EngineConfig::from_env()?))
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        messages.push(ApiMessage {
            role: "system".to_string(),
            content: Some(request.system_prompt.clone()),
            tool_calls: None,
            tool_call_id: None,
        });
        messages.extend(request.messages.iter().map(to_api_message));

        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(
                request
                    .tools
                    .iter()
                    .map(|t| ApiTool {
                        tool_type: "function".to_string(),
                        function: ApiFunctionDef {
                            name: t.name.clone(),
                            description: t.description.clone(),
                            parameters: t.parameters.clone(),
                        },
                    })
                    .collect(),
            )
        };

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens.or(self.config.max_tokens),
            temperature: request.temperature.or(self.config.temperature),
            tools,
            stream: true,
        }
    }
}

fn to_api_message(message: &EngineMessage) -> ApiMessage {
    let tool_calls = if message.tool_calls.is_empty() {
        None
    } else {
        Some(
            message
                .tool_calls
                .iter()
                .map(|call| ApiToolCall {
                    id: call.id.clone(),
                    call_type: "function".to_string(),
                    function: ApiFunctionCall {
                        name: call.name.clone(),
                        arguments: call.arguments.to_string(),
                    },
                })
                .collect(),
        )
    };

    // Assistant tool-call messages may carry no text; the API wants null
    // there rather than an empty string.
    let content = if message.content.is_empty() && tool_calls.is_some() {
        None
    } else {
        Some(message.content.clone())
    };

    ApiMessage {
        role: message.role.clone(),
        content,
        tool_calls,
        tool_call_id: message.tool_call_id.clone(),
    }
}

#[async_trait]
impl CompletionEngine for OpenAiEngine {
    async fn stream(&self, request: CompletionRequest) -> Result<CompletionStream, EngineError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);
        let body = self.build_request(&request);

        debug!(model = %body.model, messages = body.messages.len(), "Starting completion round");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(EngineError::Api(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }
            return Err(EngineError::Api(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let (tx, rx) = mpsc::channel(32);
        tokio::spawn(async move {
            let mut decoder = StreamDecoder::new();
            let mut chunks = response.bytes_stream();

            while let Some(chunk) = chunks.next().await {
                match chunk {
                    Ok(bytes) => {
                        for event in decoder.feed(&bytes) {
                            let terminal = event.is_err();
                            if tx.send(event).await.is_err() {
                                // Receiver dropped; stop reading.
                                return;
                            }
                            if terminal {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Completion stream broke mid-response");
                        let _ = tx.send(Err(EngineError::Stream(e.to_string()))).await;
                        return;
                    }
                }
            }

            for event in decoder.end() {
                if tx.send(event).await.is_err() {
                    return;
                }
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}

/// A tool call being assembled from streamed fragments.
#[derive(Debug, Default)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Incremental SSE decoder for chat-completion chunks.
///
/// Text deltas are emitted as soon as they arrive. Tool-call fragments are
/// accumulated per index and emitted as complete requests when the round
/// finishes.
struct StreamDecoder {
    buffer: Vec<u8>,
    pending: BTreeMap<usize, PendingToolCall>,
    finished: bool,
}

impl StreamDecoder {
    fn new() -> Self {
        Self {
            buffer: Vec::new(),
            pending: BTreeMap::new(),
            finished: false,
        }
    }

    /// Feed raw bytes, returning any events they complete.
    fn feed(&mut self, chunk: &[u8]) -> Vec<Result<CompletionEvent, EngineError>> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            match std::str::from_utf8(&line) {
                Ok(line) => self.process_line(line.trim(), &mut events),
                Err(e) => {
                    events.push(Err(EngineError::Protocol(format!(
                        "Invalid UTF-8 in stream: {}",
                        e
                    ))));
                    return events;
                }
            }
            if self.finished {
                break;
            }
        }

        events
    }

    /// Signal end of input. The server terminates with `[DONE]`; anything
    /// else means the connection died early.
    fn end(&mut self) -> Vec<Result<CompletionEvent, EngineError>> {
        if self.finished {
            Vec::new()
        } else {
            vec![Err(EngineError::Stream(
                "stream ended before completion".to_string(),
            ))]
        }
    }

    fn process_line(&mut self, line: &str, events: &mut Vec<Result<CompletionEvent, EngineError>>) {
        let Some(payload) = line.strip_prefix("data:") else {
            // Comments, blank keep-alive lines, other SSE fields.
            return;
        };
        let payload = payload.trim();

        if payload == "[DONE]" {
            if !self.finished {
                // Finish never arrived in-band; infer it from what we hold.
                let reason = if self.pending.is_empty() {
                    FinishReason::Stop
                } else {
                    self.flush_pending(events);
                    FinishReason::ToolCalls
                };
                events.push(Ok(CompletionEvent::Finished(reason)));
                self.finished = true;
            }
            return;
        }

        let chunk: ChatCompletionChunk = match serde_json::from_str(payload) {
            Ok(chunk) => chunk,
            Err(e) => {
                events.push(Err(EngineError::Protocol(format!(
                    "Malformed chunk: {}",
                    e
                ))));
                return;
            }
        };

        for choice in chunk.choices {
            if let Some(text) = choice.delta.content {
                if !text.is_empty() {
                    events.push(Ok(CompletionEvent::TextDelta(text)));
                }
            }

            for fragment in choice.delta.tool_calls.unwrap_or_default() {
                let pending = self.pending.entry(fragment.index).or_default();
                if let Some(id) = fragment.id {
                    pending.id = id;
                }
                if let Some(function) = fragment.function {
                    if let Some(name) = function.name {
                        pending.name = name;
                    }
                    if let Some(arguments) = function.arguments {
                        pending.arguments.push_str(&arguments);
                    }
                }
            }

            match choice.finish_reason.as_deref() {
                Some("tool_calls") => {
                    self.flush_pending(events);
                    events.push(Ok(CompletionEvent::Finished(FinishReason::ToolCalls)));
                    self.finished = true;
                }
                Some(other) => {
                    // Fragments with no tool_calls finish would otherwise
                    // vanish; treat that as a broken server.
                    if self.pending.is_empty() {
                        events.push(Ok(CompletionEvent::Finished(FinishReason::Stop)));
                    } else {
                        events.push(Err(EngineError::Protocol(format!(
                            "Finish reason '{}' with tool call fragments pending",
                            other
                        ))));
                    }
                    self.finished = true;
                }
                None => {}
            }
        }
    }

    fn flush_pending(&mut self, events: &mut Vec<Result<CompletionEvent, EngineError>>) {
        for (_, pending) in std::mem::take(&mut self.pending) {
            if pending.id.is_empty() || pending.name.is_empty() {
                events.push(Err(EngineError::Protocol(
                    "Tool call missing id or name".to_string(),
                )));
                continue;
            }
            let arguments: Value = if pending.arguments.is_empty() {
                Value::Object(Default::default())
            } else {
                match serde_json::from_str(&pending.arguments) {
                    Ok(value) => value,
                    Err(e) => {
                        events.push(Err(EngineError::Protocol(format!(
                            "Tool call '{}' has malformed arguments: {}",
                            pending.name, e
                        ))));
                        continue;
                    }
                }
            };
            events.push(Ok(CompletionEvent::ToolCall(ToolCallRequest {
                id: pending.id,
                name: pending.name,
                arguments,
            })));
        }
    }
}
