//! OpenAI-compatible streaming completion backend.
//!
//! [`OpenAiEngine`] implements [`journal_core::CompletionEngine`] against
//! any `/v1/chat/completions` endpoint that supports `stream: true` and
//! function tools. Text deltas are forwarded as they arrive; tool-call
//! argument fragments are assembled per index and emitted whole.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_engine::OpenAiEngine;
//!
//! let engine = OpenAiEngine::from_env()?;
//! let stream = engine.stream(request).await?;
//! ```

mod api_types;
mod config;
mod engine;

pub use config::EngineConfig;
pub use engine::OpenAiEngine;
