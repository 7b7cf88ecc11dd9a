//! Per-turn live context injected into the system prompt.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use sqlx::SqlitePool;

use database::entry::{self, EntryFilter};
use database::JournalEntry;
use journal_core::dates::compute_streak;

use crate::config::AgentConfig;

/// How far back the streak scan looks.
const STREAK_WINDOW_DAYS: i64 = 90;

/// A snapshot of the journal taken at the start of a turn: today's date,
/// the current streak, and the most recent entries.
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub today: NaiveDate,
    pub streak_days: u32,
    pub recent: Vec<JournalEntry>,
}

impl TurnContext {
    /// Load the context for one owner. A store failure degrades to a
    /// date-only context rather than failing the turn.
    pub async fn load(
        pool: &SqlitePool,
        owner_id: &str,
        config: &AgentConfig,
        today: NaiveDate,
    ) -> Self {
        match Self::try_load(pool, owner_id, config, today).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "Context load failed, degrading to date-only");
                Self {
                    today,
                    streak_days: 0,
                    recent: Vec::new(),
                }
            }
        }
    }

    async fn try_load(
        pool: &SqlitePool,
        owner_id: &str,
        config: &AgentConfig,
        today: NaiveDate,
    ) -> database::Result<Self> {
        let recent_filter = EntryFilter {
            since: Some(today - Duration::days(config.context_lookback_days - 1)),
            search: None,
            tag: None,
            limit: config.context_max_entries,
        };
        let recent = entry::query_entries(pool, owner_id, &recent_filter).await?;

        let streak_filter = EntryFilter {
            since: Some(today - Duration::days(STREAK_WINDOW_DAYS - 1)),
            search: None,
            tag: None,
            limit: -1,
        };
        let dates: HashSet<NaiveDate> = entry::query_entries(pool, owner_id, &streak_filter)
            .await?
            .iter()
            .map(|e| e.entry_date)
            .collect();
        let streak_days = compute_streak(&dates, today);

        Ok(Self {
            today,
            streak_days,
            recent,
        })
    }

    /// Render the context as a system-prompt suffix.
    pub fn render(&self) -> String {
        let mut rendered = format!("[Context: Today is {}.]", self.today);

        if self.streak_days > 0 {
            rendered.push_str(&format!(
                "\nCurrent journaling streak: {} day{}.",
                self.streak_days,
                if self.streak_days == 1 { "" } else { "s" }
            ));
        }

        if !self.recent.is_empty() {
            rendered.push_str("\nRecent entries:");
            for entry in &self.recent {
                let summary = entry.summary.as_deref().unwrap_or("(no summary)");
                match entry.mood {
                    Some(mood) => rendered.push_str(&format!(
                        "\n\u{2022} {}: {} ({})",
                        entry.entry_date,
                        summary,
                        mood.as_str()
                    )),
                    None => rendered
                        .push_str(&format!("\n\u{2022} {}: {}", entry.entry_date, summary)),
                }
            }
        }

        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::entry::NewEntry;
    use database::{Database, Mood};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_empty_journal_renders_date_only() {
        let db = test_db().await;
        let config = AgentConfig::default();
        let today = date(2026, 8, 30);

        let context = TurnContext::load(db.pool(), "user-1", &config, today).await;
        assert_eq!(context.render(), "[Context: Today is 2026-08-30.]");
    }

    #[tokio::test]
    async fn test_recent_entries_and_streak_rendered() {
        let db = test_db().await;
        let config = AgentConfig::default();
        let today = date(2026, 8, 30);

        for (day, summary) in [(29, "Long run"), (30, "Quiet Sunday")] {
            entry::create_entry(
                db.pool(),
                "user-1",
                NewEntry {
                    content: "body".to_string(),
                    summary: Some(summary.to_string()),
                    entry_date: Some(date(2026, 8, day)),
                    mood: Some(Mood::Happy),
                    tags: vec![],
                },
                today,
            )
            .await
            .unwrap();
        }

        let context = TurnContext::load(db.pool(), "user-1", &config, today).await;
        assert_eq!(context.streak_days, 2);

        let rendered = context.render();
        assert!(rendered.contains("[Context: Today is 2026-08-30.]"));
        assert!(rendered.contains("streak: 2 days"));
        assert!(rendered.contains("\u{2022} 2026-08-30: Quiet Sunday (happy)"));
        assert!(rendered.contains("\u{2022} 2026-08-29: Long run (happy)"));
    }

    #[tokio::test]
    async fn test_lookback_excludes_old_entries() {
        let db = test_db().await;
        let config = AgentConfig::default();
        let today = date(2026, 8, 30);

        entry::create_entry(
            db.pool(),
            "user-1",
            NewEntry {
                content: "body".to_string(),
                summary: Some("Too old".to_string()),
                entry_date: Some(date(2026, 8, 20)),
                mood: None,
                tags: vec![],
            },
            today,
        )
        .await
        .unwrap();

        let context = TurnContext::load(db.pool(), "user-1", &config, today).await;
        assert!(context.recent.is_empty());
    }
}
