//! Configuration for the agent loop.

use std::env;

/// Configuration for the agent loop.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Hard ceiling on completion round-trips per turn.
    pub max_steps: u32,

    /// How many days of recent entries go into the turn context.
    pub context_lookback_days: i64,

    /// Maximum recent entries injected into the turn context.
    pub context_max_entries: i64,

    /// Max tokens per completion round (engine default when unset).
    pub max_tokens: Option<u32>,

    /// Temperature per completion round (engine default when unset).
    pub temperature: Option<f32>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: 8,
            context_lookback_days: 3,
            context_max_entries: 5,
            max_tokens: None,
            temperature: None,
        }
    }
}

impl AgentConfig {
    /// Create configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `JOURNAL_MAX_STEPS` - Max completion rounds per turn (default: 8)
    /// - `JOURNAL_CONTEXT_LOOKBACK_DAYS` - Context lookback (default: 3)
    /// - `JOURNAL_CONTEXT_MAX_ENTRIES` - Context entry cap (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let max_steps = env::var("JOURNAL_MAX_STEPS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_steps);

        let context_lookback_days = env::var("JOURNAL_CONTEXT_LOOKBACK_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.context_lookback_days);

        let context_max_entries = env::var("JOURNAL_CONTEXT_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.context_max_entries);

        Self {
            max_steps,
            context_lookback_days,
            context_max_entries,
            ..defaults
        }
    }
}
