//! The conversational agent loop.
//!
//! [`Agent::run_turn`] drives one user turn end to end: it loads a live
//! snapshot of the journal into the system prompt, streams a completion,
//! executes any tool calls the engine requests, feeds the results back,
//! and repeats up to a fixed step budget. Progress streams out as
//! [`AgentEvent`]s; the finished turn comes back as a [`TurnOutcome`] for
//! the caller to persist.

mod config;
mod context;
mod error;
mod events;
mod prompts;
mod title;
mod turn;

pub use config::AgentConfig;
pub use context::TurnContext;
pub use error::AgentError;
pub use events::{AgentEvent, DoneReason};
pub use prompts::JOURNAL_SYSTEM_PROMPT;
pub use title::generate_title;
pub use turn::{Agent, TurnOutcome};
