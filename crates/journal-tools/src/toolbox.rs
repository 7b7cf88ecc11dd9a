//! Owner-scoped tool executor.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use database::entry::{self, EntryFilter, EntryPatch, NewEntry};
use database::{JournalEntry, Mood};
use journal_core::dates::compute_streak;

use crate::call::{
    AnalyzeJournalInput, QueryEntriesInput, SaveEntryInput, ToolCall, DEFAULT_LIMIT,
};
use crate::error::ToolError;

/// Executes validated tool calls against one owner's journal.
///
/// Bound to the identity resolved at the start of the turn; every store
/// call it makes is scoped to that owner. Execution never surfaces an
/// error to the loop: failures become `{"success": false, "error": ...}`
/// payloads the model can read and react to.
#[derive(Debug, Clone)]
pub struct Toolbox {
    pool: SqlitePool,
    owner_id: String,
    today: NaiveDate,
}

impl Toolbox {
    pub fn new(pool: SqlitePool, owner_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            pool,
            owner_id: owner_id.into(),
            today,
        }
    }

    /// Execute one call, returning a JSON payload for the transcript.
    pub async fn execute(&self, call: ToolCall) -> Value {
        let name = call.name();
        let result = match call {
            ToolCall::SaveEntry(input) => self.save_entry(input).await,
            ToolCall::QueryEntries(input) => self.query_entries(input).await,
            ToolCall::AnalyzeJournal(input) => self.analyze_journal(input).await,
        };

        match result {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "Tool execution failed");
                json!({ "success": false, "error": e.to_string() })
            }
        }
    }

    async fn save_entry(&self, input: SaveEntryInput) -> Result<Value, ToolError> {
        match input.entry_id {
            Some(entry_id) => {
                let patch = EntryPatch {
                    content: Some(input.content),
                    summary: input.summary,
                    entry_date: input.entry_date,
                    mood: input.mood,
                    tags: input.tags,
                };
                let updated =
                    entry::update_entry(&self.pool, &self.owner_id, &entry_id, patch).await?;
                tracing::info!(entry_id = %updated.id, "Updated journal entry via tool");
                Ok(json!({ "success": true, "entry_id": updated.id, "updated": true }))
            }
            None => {
                let new = NewEntry {
                    content: input.content,
                    summary: input.summary,
                    entry_date: input.entry_date,
                    mood: input.mood,
                    tags: input.tags.unwrap_or_default(),
                };
                let created =
                    entry::create_entry(&self.pool, &self.owner_id, new, self.today).await?;
                tracing::info!(entry_id = %created.id, "Created journal entry via tool");
                Ok(json!({ "success": true, "entry_id": created.id, "created": true }))
            }
        }
    }

    async fn query_entries(&self, input: QueryEntriesInput) -> Result<Value, ToolError> {
        let filter = EntryFilter {
            // days counts today, so days=1 covers today only.
            since: input.days.map(|d| self.today - Duration::days(d - 1)),
            search: input.search,
            tag: input.tag,
            limit: input.limit.unwrap_or(DEFAULT_LIMIT),
        };
        let entries = entry::query_entries(&self.pool, &self.owner_id, &filter).await?;

        let rendered: Vec<Value> = entries
            .iter()
            .map(|e| render_entry(e, input.include_content))
            .collect();

        Ok(json!({
            "success": true,
            "count": rendered.len(),
            "entries": rendered,
        }))
    }

    async fn analyze_journal(&self, input: AnalyzeJournalInput) -> Result<Value, ToolError> {
        let since = self.today - Duration::days(input.period.lookback_days() - 1);
        let filter = EntryFilter {
            since: Some(since),
            search: None,
            tag: None,
            // Negative LIMIT disables the cap in SQLite.
            limit: -1,
        };
        let entries = entry::query_entries(&self.pool, &self.owner_id, &filter).await?;

        let dates: HashSet<NaiveDate> = entries.iter().map(|e| e.entry_date).collect();
        let streak_days = compute_streak(&dates, self.today);

        let avg_entry_length = if entries.is_empty() {
            0
        } else {
            let total: usize = entries.iter().map(|e| e.content.chars().count()).sum();
            (total as f64 / entries.len() as f64).round() as u64
        };

        let mut mood_counts: HashMap<Mood, u64> = HashMap::new();
        for e in &entries {
            if let Some(mood) = e.mood {
                *mood_counts.entry(mood).or_insert(0) += 1;
            }
        }
        // All five buckets are always present, zero-filled.
        let mood_distribution: Value = Mood::ALL
            .iter()
            .map(|m| (m.as_str().to_string(), json!(mood_counts.get(m).copied().unwrap_or(0))))
            .collect::<serde_json::Map<String, Value>>()
            .into();

        let unique_tags: BTreeSet<&str> = entries
            .iter()
            .flat_map(|e| e.tags.0.iter().map(String::as_str))
            .collect();

        Ok(json!({
            "success": true,
            "total_entries": entries.len(),
            "streak_days": streak_days,
            "avg_entry_length": avg_entry_length,
            "mood_distribution": mood_distribution,
            "unique_tags": unique_tags,
            "period": input.period.as_str(),
        }))
    }
}

fn render_entry(entry: &JournalEntry, include_content: bool) -> Value {
    let mut rendered = json!({
        "id": entry.id,
        "entry_date": entry.entry_date.to_string(),
        "summary": entry.summary,
        "mood": entry.mood.map(|m| m.as_str()),
        "tags": entry.tags.0,
    });
    if include_content {
        rendered["content"] = json!(entry.content);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::Database;
    use serde_json::json;

    async fn test_toolbox(today: NaiveDate) -> (Database, Toolbox) {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        let toolbox = Toolbox::new(db.pool().clone(), "user-1", today);
        (db, toolbox)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn run(toolbox: &Toolbox, name: &str, args: Value) -> Value {
        let call = ToolCall::parse(name, &args).unwrap();
        toolbox.execute(call).await
    }

    #[tokio::test]
    async fn test_save_then_query_round_trip() {
        let today = date(2026, 8, 30);
        let (_db, toolbox) = test_toolbox(today).await;

        let saved = run(
            &toolbox,
            "save_entry",
            json!({
                "content": "Shipped the new feature. Felt great.",
                "summary": "Shipped feature",
                "mood": "very_happy",
                "tags": ["work"]
            }),
        )
        .await;
        assert_eq!(saved["success"], json!(true));
        assert_eq!(saved["created"], json!(true));

        let queried = run(&toolbox, "query_entries", json!({"days": 1})).await;
        assert_eq!(queried["success"], json!(true));
        assert_eq!(queried["count"], json!(1));
        let entry = &queried["entries"][0];
        assert_eq!(entry["summary"], json!("Shipped feature"));
        assert_eq!(entry["mood"], json!("very_happy"));
        // Summaries only by default.
        assert!(entry.get("content").is_none());
    }

    #[tokio::test]
    async fn test_query_include_content() {
        let today = date(2026, 8, 30);
        let (_db, toolbox) = test_toolbox(today).await;

        run(
            &toolbox,
            "save_entry",
            json!({"content": "Full text here", "summary": "s"}),
        )
        .await;

        let queried = run(
            &toolbox,
            "query_entries",
            json!({"days": 1, "include_content": true}),
        )
        .await;
        assert_eq!(queried["entries"][0]["content"], json!("Full text here"));
    }

    #[tokio::test]
    async fn test_save_with_entry_id_updates() {
        let today = date(2026, 8, 30);
        let (db, toolbox) = test_toolbox(today).await;

        let saved = run(&toolbox, "save_entry", json!({"content": "First draft"})).await;
        let entry_id = saved["entry_id"].as_str().unwrap().to_string();

        let updated = run(
            &toolbox,
            "save_entry",
            json!({"entry_id": entry_id, "content": "Second draft", "mood": "happy"}),
        )
        .await;
        assert_eq!(updated["success"], json!(true));
        assert_eq!(updated["updated"], json!(true));

        let entries = entry::list_entries(db.pool(), "user-1").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content, "Second draft");
        assert_eq!(entries[0].mood, Some(Mood::Happy));
    }

    #[tokio::test]
    async fn test_store_failure_becomes_error_payload() {
        let today = date(2026, 8, 30);
        let (_db, toolbox) = test_toolbox(today).await;

        let result = run(
            &toolbox,
            "save_entry",
            json!({"entry_id": "no-such-entry", "content": "x"}),
        )
        .await;
        assert_eq!(result["success"], json!(false));
        assert!(result["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_analyze_empty_window() {
        let today = date(2026, 8, 30);
        let (_db, toolbox) = test_toolbox(today).await;

        let stats = run(&toolbox, "analyze_journal", json!({"period": "week"})).await;
        assert_eq!(stats["success"], json!(true));
        assert_eq!(stats["total_entries"], json!(0));
        assert_eq!(stats["streak_days"], json!(0));
        assert_eq!(stats["avg_entry_length"], json!(0));
        assert_eq!(stats["unique_tags"], json!([]));
        assert_eq!(stats["period"], json!("week"));

        // All five mood buckets present even with no entries.
        let distribution = stats["mood_distribution"].as_object().unwrap();
        assert_eq!(distribution.len(), 5);
        for mood in Mood::ALL {
            assert_eq!(distribution[mood.as_str()], json!(0));
        }
    }

    #[tokio::test]
    async fn test_analyze_counts_streak_and_moods() {
        let today = date(2026, 8, 30);
        let (_db, toolbox) = test_toolbox(today).await;

        for (day, mood) in [(28, "neutral"), (29, "happy"), (30, "happy")] {
            run(
                &toolbox,
                "save_entry",
                json!({
                    "content": "A reasonably long entry body.",
                    "entry_date": format!("2026-08-{day}"),
                    "mood": mood,
                    "tags": ["daily"]
                }),
            )
            .await;
        }

        let stats = run(&toolbox, "analyze_journal", json!({"period": "week"})).await;
        assert_eq!(stats["total_entries"], json!(3));
        assert_eq!(stats["streak_days"], json!(3));
        assert_eq!(stats["mood_distribution"]["happy"], json!(2));
        assert_eq!(stats["mood_distribution"]["neutral"], json!(1));
        assert_eq!(stats["mood_distribution"]["very_sad"], json!(0));
        assert_eq!(stats["unique_tags"], json!(["daily"]));
        assert_eq!(stats["avg_entry_length"], json!(29));
    }

    #[tokio::test]
    async fn test_days_window_excludes_older_entries() {
        let today = date(2026, 8, 30);
        let (_db, toolbox) = test_toolbox(today).await;

        run(
            &toolbox,
            "save_entry",
            json!({"content": "old", "entry_date": "2026-08-20"}),
        )
        .await;
        run(&toolbox, "save_entry", json!({"content": "today"})).await;

        let queried = run(&toolbox, "query_entries", json!({"days": 3})).await;
        assert_eq!(queried["count"], json!(1));
    }
}
