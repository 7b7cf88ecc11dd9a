//! The per-turn agent loop.
//!
//! One turn is an explicit state machine with a step counter: prepare the
//! live context, ask the engine for a completion, execute any requested
//! tools, feed the results back, and repeat until the engine answers with
//! text only or the step budget runs out. Every transition is visible in
//! this file; there are no hooks.

use std::sync::Arc;

use futures_util::future::join_all;
use futures_util::StreamExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use journal_core::{
    ChatTurn, CompletionEngine, CompletionEvent, CompletionRequest, EngineMessage, FinishReason,
    Part, Role, ToolCallRequest, ToolResult,
};
use journal_tools::{definitions, ToolCall, Toolbox};

use crate::config::AgentConfig;
use crate::context::TurnContext;
use crate::error::AgentError;
use crate::events::{AgentEvent, DoneReason};
use crate::prompts::JOURNAL_SYSTEM_PROMPT;
use crate::title;

/// Where the loop currently is. `ExecutingTools` carries the round's
/// assistant text and requested calls so no state lives outside the enum.
#[derive(Debug)]
enum TurnState {
    PreparingContext,
    AwaitingCompletion,
    ExecutingTools {
        text: String,
        calls: Vec<ToolCallRequest>,
    },
    Finished(DoneReason),
}

/// What a finished turn produced: the assistant turns to append to the
/// session transcript, and why the loop stopped.
#[derive(Debug)]
pub struct TurnOutcome {
    pub turns: Vec<ChatTurn>,
    pub reason: DoneReason,
}

/// Event sender that tolerates a departed client. Once a send fails the
/// emitter goes quiet; the loop checks [`Emitter::disconnected`] to avoid
/// starting further completion rounds.
struct Emitter {
    tx: mpsc::Sender<AgentEvent>,
    disconnected: bool,
}

impl Emitter {
    fn new(tx: mpsc::Sender<AgentEvent>) -> Self {
        Self {
            tx,
            disconnected: false,
        }
    }

    async fn emit(&mut self, event: AgentEvent) {
        if self.disconnected {
            return;
        }
        if self.tx.send(event).await.is_err() {
            self.disconnected = true;
        }
    }

    fn disconnected(&self) -> bool {
        self.disconnected
    }
}

/// The conversational agent: one engine, one store, one configuration.
#[derive(Clone)]
pub struct Agent {
    engine: Arc<dyn CompletionEngine>,
    pool: SqlitePool,
    config: AgentConfig,
}

impl Agent {
    pub fn new(engine: Arc<dyn CompletionEngine>, pool: SqlitePool, config: AgentConfig) -> Self {
        Self {
            engine,
            pool,
            config,
        }
    }

    /// Run one turn for an owner whose identity the caller has already
    /// resolved. `transcript` is the full session history ending with the
    /// user's latest message; events stream out as the turn progresses.
    pub async fn run_turn(
        &self,
        owner_id: &str,
        transcript: &[ChatTurn],
        events: mpsc::Sender<AgentEvent>,
    ) -> Result<TurnOutcome, AgentError> {
        let today = journal_core::dates::today();
        let toolbox = Toolbox::new(self.pool.clone(), owner_id, today);
        let tools = definitions();

        let mut emitter = Emitter::new(events);
        let mut system_prompt = String::new();
        let mut messages: Vec<EngineMessage> = Vec::new();
        let mut produced: Vec<ChatTurn> = Vec::new();
        let mut step: u32 = 0;
        let mut state = TurnState::PreparingContext;

        let reason = loop {
            state = match state {
                TurnState::PreparingContext => {
                    let context =
                        TurnContext::load(&self.pool, owner_id, &self.config, today).await;
                    system_prompt = format!("{}\n\n{}", JOURNAL_SYSTEM_PROMPT, context.render());
                    messages = transcript_to_messages(transcript);
                    TurnState::AwaitingCompletion
                }

                TurnState::AwaitingCompletion => {
                    step += 1;
                    debug!(step, "Starting completion round");

                    let request = CompletionRequest {
                        system_prompt: system_prompt.clone(),
                        messages: messages.clone(),
                        tools: tools.clone(),
                        max_tokens: self.config.max_tokens,
                        temperature: self.config.temperature,
                    };
                    let mut stream = match self.engine.stream(request).await {
                        Ok(stream) => stream,
                        Err(e) => {
                            emitter
                                .emit(AgentEvent::Error {
                                    message: e.to_string(),
                                })
                                .await;
                            return Err(e.into());
                        }
                    };

                    let mut text = String::new();
                    let mut calls: Vec<ToolCallRequest> = Vec::new();
                    let mut finish = FinishReason::Stop;
                    loop {
                        let Some(event) = stream.next().await else {
                            break;
                        };
                        match event {
                            Ok(CompletionEvent::TextDelta(delta)) => {
                                emitter
                                    .emit(AgentEvent::TextDelta {
                                        text: delta.clone(),
                                    })
                                    .await;
                                text.push_str(&delta);
                            }
                            Ok(CompletionEvent::ToolCall(call)) => calls.push(call),
                            Ok(CompletionEvent::Finished(reason)) => {
                                finish = reason;
                                break;
                            }
                            Err(e) => {
                                emitter
                                    .emit(AgentEvent::Error {
                                        message: e.to_string(),
                                    })
                                    .await;
                                return Err(e.into());
                            }
                        }
                    }

                    if finish == FinishReason::ToolCalls && !calls.is_empty() {
                        TurnState::ExecutingTools { text, calls }
                    } else {
                        if !text.trim().is_empty() {
                            produced.push(ChatTurn::assistant(text));
                        }
                        TurnState::Finished(DoneReason::Completed)
                    }
                }

                TurnState::ExecutingTools { text, calls } => {
                    let (turn, results) =
                        self.execute_tools(&toolbox, &text, &calls, &mut emitter).await;
                    produced.push(turn);

                    messages.push(EngineMessage::assistant_tool_calls(text, calls));
                    for result in &results {
                        messages.push(EngineMessage::tool(
                            result.tool_call_id.clone(),
                            result.payload.to_string(),
                        ));
                    }

                    if emitter.disconnected() {
                        info!("Client disconnected, skipping further completion rounds");
                        TurnState::Finished(DoneReason::Completed)
                    } else if step >= self.config.max_steps {
                        info!(step, "Step budget exhausted");
                        TurnState::Finished(DoneReason::StepLimitReached)
                    } else {
                        TurnState::AwaitingCompletion
                    }
                }

                TurnState::Finished(reason) => break reason,
            };
        };

        emitter.emit(AgentEvent::Done { reason }).await;
        Ok(TurnOutcome {
            turns: produced,
            reason,
        })
    }

    /// Execute one round of tool calls. Malformed calls are answered with
    /// synthesized failure results without touching the executor; valid
    /// calls run concurrently and results are matched back by call id.
    async fn execute_tools(
        &self,
        toolbox: &Toolbox,
        text: &str,
        calls: &[ToolCallRequest],
        emitter: &mut Emitter,
    ) -> (ChatTurn, Vec<ToolResult>) {
        let mut parts: Vec<Part> = Vec::with_capacity(calls.len() + 1);
        if !text.trim().is_empty() {
            parts.push(Part::Text {
                text: text.to_string(),
            });
        }
        for call in calls {
            emitter
                .emit(AgentEvent::ToolCallStarted {
                    id: call.id.clone(),
                    name: call.name.clone(),
                })
                .await;
            emitter
                .emit(AgentEvent::ToolCallInput {
                    id: call.id.clone(),
                    arguments: call.arguments.clone(),
                })
                .await;
            parts.push(Part::ToolInvocation {
                id: call.id.clone(),
                name: call.name.clone(),
                arguments: call.arguments.clone(),
                output: None,
            });
        }

        let mut results: Vec<ToolResult> = Vec::with_capacity(calls.len());
        let mut runnable = Vec::new();
        for call in calls {
            match ToolCall::parse(&call.name, &call.arguments) {
                Ok(parsed) => runnable.push((call.id.clone(), parsed)),
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "Rejected malformed tool call");
                    results.push(ToolResult::error(call.id.clone(), e.to_string()));
                }
            }
        }

        let executed = join_all(runnable.into_iter().map(|(id, parsed)| async move {
            let payload = toolbox.execute(parsed).await;
            (id, payload)
        }))
        .await;
        for (id, payload) in executed {
            let success = payload
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            results.push(ToolResult {
                tool_call_id: id,
                payload,
                success,
            });
        }

        // Back into request order for the transcript and the engine.
        let mut ordered = Vec::with_capacity(calls.len());
        for call in calls {
            if let Some(pos) = results.iter().position(|r| r.tool_call_id == call.id) {
                ordered.push(results.remove(pos));
            }
        }

        for result in &ordered {
            let event = if result.success {
                AgentEvent::ToolCallOutput {
                    id: result.tool_call_id.clone(),
                    output: result.payload.clone(),
                }
            } else {
                let error = result
                    .payload
                    .get("error")
                    .and_then(Value::as_str)
                    .unwrap_or("tool execution failed")
                    .to_string();
                AgentEvent::ToolCallFailed {
                    id: result.tool_call_id.clone(),
                    error,
                }
            };
            emitter.emit(event).await;

            for part in &mut parts {
                if let Part::ToolInvocation { id, output, .. } = part {
                    if *id == result.tool_call_id {
                        *output = Some(result.payload.clone());
                    }
                }
            }
        }

        (
            ChatTurn {
                role: Role::Assistant,
                parts,
            },
            ordered,
        )
    }

    /// Generate a short session title from the opening exchange.
    pub async fn generate_title(
        &self,
        user_text: &str,
        assistant_text: &str,
    ) -> Result<String, AgentError> {
        title::generate_title(self.engine.as_ref(), user_text, assistant_text).await
    }
}

/// Flatten a stored transcript into engine messages. Tool invocations
/// embedded in assistant turns become an assistant tool-call message
/// followed by tool-result messages.
fn transcript_to_messages(transcript: &[ChatTurn]) -> Vec<EngineMessage> {
    let mut messages = Vec::with_capacity(transcript.len());
    for turn in transcript {
        match turn.role {
            Role::System => messages.push(EngineMessage::system(turn.text())),
            Role::User => messages.push(EngineMessage::user(turn.text())),
            Role::Assistant => {
                let mut calls = Vec::new();
                let mut outputs = Vec::new();
                for part in &turn.parts {
                    if let Part::ToolInvocation {
                        id,
                        name,
                        arguments,
                        output,
                    } = part
                    {
                        calls.push(ToolCallRequest {
                            id: id.clone(),
                            name: name.clone(),
                            arguments: arguments.clone(),
                        });
                        if let Some(output) = output {
                            outputs.push((id.clone(), output.to_string()));
                        }
                    }
                }
                if calls.is_empty() {
                    messages.push(EngineMessage::assistant(turn.text()));
                } else {
                    messages.push(EngineMessage::assistant_tool_calls(turn.text(), calls));
                    for (id, output) in outputs {
                        messages.push(EngineMessage::tool(id, output));
                    }
                }
            }
            // Tool outputs live inside assistant turns; a bare tool turn
            // has nothing to add.
            Role::Tool => {}
        }
    }
    messages
}
