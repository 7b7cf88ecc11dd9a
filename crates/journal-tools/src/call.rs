//! Parsing and validation of model-requested tool calls.
//!
//! The tool set is a closed enum: a call either parses into one of the
//! three known shapes or fails with a [`ToolError`] before any store code
//! runs.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use database::Mood;

use crate::error::ToolError;

/// Allowed lookback range for `query_entries.days`.
pub const DAYS_RANGE: (i64, i64) = (1, 90);

/// Allowed result-count range for `query_entries.limit`.
pub const LIMIT_RANGE: (i64, i64) = (1, 20);

/// Default for `query_entries.limit`.
pub const DEFAULT_LIMIT: i64 = 10;

/// Arguments for `save_entry`.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveEntryInput {
    /// When set, updates this entry instead of creating one.
    pub entry_id: Option<String>,
    pub content: String,
    pub summary: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
}

/// Arguments for `query_entries`. Filters are conjunctive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryEntriesInput {
    /// Lookback window counting today, so `days: 1` is today only.
    pub days: Option<i64>,
    pub search: Option<String>,
    pub tag: Option<String>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub include_content: bool,
}

/// Analysis window for `analyze_journal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    Month,
    All,
}

impl Period {
    /// Lookback in days, counting today.
    pub fn lookback_days(&self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::All => 3650,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }
}

/// Arguments for `analyze_journal`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeJournalInput {
    pub period: Period,
}

/// A validated tool call, ready for the executor.
#[derive(Debug, Clone)]
pub enum ToolCall {
    SaveEntry(SaveEntryInput),
    QueryEntries(QueryEntriesInput),
    AnalyzeJournal(AnalyzeJournalInput),
}

impl ToolCall {
    /// Parse a named call with JSON arguments. Unknown names, malformed
    /// arguments and out-of-range values are all rejected here so they
    /// never reach the store.
    pub fn parse(name: &str, arguments: &Value) -> Result<Self, ToolError> {
        match name {
            "save_entry" => {
                if arguments.get("content").is_none() {
                    return Err(ToolError::MissingParameter("content"));
                }
                let input: SaveEntryInput = deserialize(arguments)?;
                if input.content.trim().is_empty() {
                    return Err(ToolError::InvalidParameter {
                        name: "content",
                        reason: "must not be empty".to_string(),
                    });
                }
                Ok(ToolCall::SaveEntry(input))
            }
            "query_entries" => {
                let input: QueryEntriesInput = deserialize(arguments)?;
                if let Some(days) = input.days {
                    check_range("days", days, DAYS_RANGE)?;
                }
                if let Some(limit) = input.limit {
                    check_range("limit", limit, LIMIT_RANGE)?;
                }
                Ok(ToolCall::QueryEntries(input))
            }
            "analyze_journal" => {
                if arguments.get("period").is_none() {
                    return Err(ToolError::MissingParameter("period"));
                }
                let input: AnalyzeJournalInput = deserialize(arguments)?;
                Ok(ToolCall::AnalyzeJournal(input))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// The wire name of this call.
    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::SaveEntry(_) => "save_entry",
            ToolCall::QueryEntries(_) => "query_entries",
            ToolCall::AnalyzeJournal(_) => "analyze_journal",
        }
    }
}

fn deserialize<T: serde::de::DeserializeOwned>(arguments: &Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments.clone()).map_err(|e| ToolError::InvalidParameter {
        name: "arguments",
        reason: e.to_string(),
    })
}

fn check_range(name: &'static str, actual: i64, (min, max): (i64, i64)) -> Result<(), ToolError> {
    if actual < min || actual > max {
        return Err(ToolError::OutOfRange {
            name,
            min,
            max,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_save_entry() {
        let call = ToolCall::parse(
            "save_entry",
            &json!({
                "content": "Rainy day, stayed in and read.",
                "summary": "Quiet reading day",
                "mood": "neutral",
                "tags": ["reading"]
            }),
        )
        .unwrap();

        match call {
            ToolCall::SaveEntry(input) => {
                assert_eq!(input.mood, Some(Mood::Neutral));
                assert!(input.entry_id.is_none());
            }
            other => panic!("wrong variant: {:?}", other),
        }
    }

    #[test]
    fn test_save_entry_requires_content() {
        let result = ToolCall::parse("save_entry", &json!({"summary": "no body"}));
        assert!(matches!(result, Err(ToolError::MissingParameter("content"))));

        let result = ToolCall::parse("save_entry", &json!({"content": "   "}));
        assert!(matches!(
            result,
            Err(ToolError::InvalidParameter { name: "content", .. })
        ));
    }

    #[test]
    fn test_save_entry_rejects_unknown_mood() {
        let result = ToolCall::parse(
            "save_entry",
            &json!({"content": "x", "mood": "ecstatic"}),
        );
        assert!(matches!(result, Err(ToolError::InvalidParameter { .. })));
    }

    #[test]
    fn test_query_entries_range_checks() {
        let result = ToolCall::parse("query_entries", &json!({"days": 0}));
        assert!(matches!(
            result,
            Err(ToolError::OutOfRange { name: "days", actual: 0, .. })
        ));

        let result = ToolCall::parse("query_entries", &json!({"days": 91}));
        assert!(matches!(result, Err(ToolError::OutOfRange { .. })));

        let result = ToolCall::parse("query_entries", &json!({"limit": 50}));
        assert!(matches!(
            result,
            Err(ToolError::OutOfRange { name: "limit", actual: 50, .. })
        ));

        assert!(ToolCall::parse("query_entries", &json!({"days": 1, "limit": 20})).is_ok());
        assert!(ToolCall::parse("query_entries", &json!({})).is_ok());
    }

    #[test]
    fn test_analyze_journal_periods() {
        for (name, days) in [("week", 7), ("month", 30), ("all", 3650)] {
            let call = ToolCall::parse("analyze_journal", &json!({"period": name})).unwrap();
            match call {
                ToolCall::AnalyzeJournal(input) => {
                    assert_eq!(input.period.lookback_days(), days);
                }
                other => panic!("wrong variant: {:?}", other),
            }
        }

        let result = ToolCall::parse("analyze_journal", &json!({"period": "year"}));
        assert!(matches!(result, Err(ToolError::InvalidParameter { .. })));

        let result = ToolCall::parse("analyze_journal", &json!({}));
        assert!(matches!(result, Err(ToolError::MissingParameter("period"))));
    }

    #[test]
    fn test_unknown_tool() {
        let result = ToolCall::parse("delete_everything", &json!({}));
        assert!(matches!(result, Err(ToolError::UnknownTool(_))));
    }
}
