//! The fixed journal tool set exposed to the completion engine.
//!
//! Three tools exist and the set is closed: `save_entry`, `query_entries`
//! and `analyze_journal`. Model-requested calls are parsed into the
//! [`ToolCall`] enum and dispatched by an exhaustive match in [`Toolbox`],
//! so an unknown tool name is a parse error rather than a lookup miss.
//!
//! # Example
//!
//! ```rust,ignore
//! use journal_tools::{definitions, ToolCall, Toolbox};
//!
//! let toolbox = Toolbox::new(pool, user.id, journal_core::dates::today());
//! let call = ToolCall::parse("query_entries", &serde_json::json!({"days": 7}))?;
//! let payload = toolbox.execute(call).await;
//! ```

mod call;
mod definitions;
mod error;
mod toolbox;

pub use call::{
    AnalyzeJournalInput, Period, QueryEntriesInput, SaveEntryInput, ToolCall, DAYS_RANGE,
    DEFAULT_LIMIT, LIMIT_RANGE,
};
pub use definitions::definitions;
pub use error::ToolError;
pub use toolbox::Toolbox;
