//! Journal entry CRUD operations.
//!
//! Every operation is owner-scoped. A row belonging to another owner is
//! indistinguishable from a row that does not exist: both surface as
//! [`DatabaseError::NotFound`].

use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::{JournalEntry, Mood};
use crate::validation::{validate_content, validate_summary};

/// Fields for a new entry. `entry_date` defaults to the caller's "today"
/// when omitted.
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub content: String,
    pub summary: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
}

/// Partial update: only supplied fields are changed.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub content: Option<String>,
    pub summary: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
}

/// Filters for [`query_entries`]. Conjunctive when combined.
#[derive(Debug, Clone)]
pub struct EntryFilter {
    /// Inclusive lower bound on `entry_date`.
    pub since: Option<NaiveDate>,
    /// Case-insensitive substring match against `content`.
    pub search: Option<String>,
    /// Exact tag membership, case-sensitive as stored.
    pub tag: Option<String>,
    /// Maximum rows returned. Callers enforce the hard caps.
    pub limit: i64,
}

const ENTRY_COLUMNS: &str =
    "id, owner_id, content, summary, entry_date, mood, tags, created_at, updated_at";

/// Escape LIKE wildcards so a search string matches literally.
fn escape_like(search: &str) -> String {
    search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Create a journal entry. `today` supplies the default `entry_date`.
pub async fn create_entry(
    pool: &SqlitePool,
    owner_id: &str,
    new: NewEntry,
    today: NaiveDate,
) -> Result<JournalEntry> {
    validate_content(&new.content)?;
    if let Some(ref summary) = new.summary {
        validate_summary(summary)?;
    }

    let id = Uuid::new_v4().to_string();
    let entry_date = new.entry_date.unwrap_or(today);

    sqlx::query(
        r#"
        INSERT INTO journal_entries (id, owner_id, content, summary, entry_date, mood, tags)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(owner_id)
    .bind(&new.content)
    .bind(&new.summary)
    .bind(entry_date)
    .bind(new.mood)
    .bind(Json(new.tags))
    .execute(pool)
    .await?;

    tracing::debug!(entry_id = %id, %entry_date, "Created journal entry");

    get_entry(pool, owner_id, &id).await
}

/// Fetch one entry by id, owner-scoped.
pub async fn get_entry(pool: &SqlitePool, owner_id: &str, id: &str) -> Result<JournalEntry> {
    let entry = sqlx::query_as::<_, JournalEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM journal_entries
        WHERE id = ? AND owner_id = ?
        "#,
    ))
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    entry.ok_or_else(|| DatabaseError::NotFound {
        entity: "Entry",
        id: id.to_string(),
    })
}

/// List every entry for an owner, newest `entry_date` first, then newest
/// `created_at`. Used by the entries-browsing UI.
pub async fn list_entries(pool: &SqlitePool, owner_id: &str) -> Result<Vec<JournalEntry>> {
    let entries = sqlx::query_as::<_, JournalEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM journal_entries
        WHERE owner_id = ?
        ORDER BY entry_date DESC, created_at DESC
        "#,
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Query entries with conjunctive filters, newest `entry_date` first.
pub async fn query_entries(
    pool: &SqlitePool,
    owner_id: &str,
    filter: &EntryFilter,
) -> Result<Vec<JournalEntry>> {
    let entries = sqlx::query_as::<_, JournalEntry>(&format!(
        r#"
        SELECT {ENTRY_COLUMNS}
        FROM journal_entries
        WHERE owner_id = ?1
          AND (?2 IS NULL OR entry_date >= ?2)
          AND (?3 IS NULL OR content LIKE '%' || ?3 || '%' ESCAPE '\')
          AND (?4 IS NULL OR EXISTS (
              SELECT 1 FROM json_each(tags) WHERE json_each.value = ?4
          ))
        ORDER BY entry_date DESC, created_at DESC
        LIMIT ?5
        "#,
    ))
    .bind(owner_id)
    .bind(filter.since)
    .bind(filter.search.as_deref().map(escape_like))
    .bind(&filter.tag)
    .bind(filter.limit)
    .fetch_all(pool)
    .await?;

    Ok(entries)
}

/// Merge the supplied fields into an entry and refresh `updated_at`.
pub async fn update_entry(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
    patch: EntryPatch,
) -> Result<JournalEntry> {
    if let Some(ref content) = patch.content {
        validate_content(content)?;
    }
    if let Some(ref summary) = patch.summary {
        validate_summary(summary)?;
    }

    let result = sqlx::query(
        r#"
        UPDATE journal_entries SET
            content = COALESCE(?3, content),
            summary = COALESCE(?4, summary),
            entry_date = COALESCE(?5, entry_date),
            mood = COALESCE(?6, mood),
            tags = COALESCE(?7, tags),
            updated_at = datetime('now')
        WHERE id = ?1 AND owner_id = ?2
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(&patch.content)
    .bind(&patch.summary)
    .bind(patch.entry_date)
    .bind(patch.mood)
    .bind(patch.tags.map(Json))
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Entry",
            id: id.to_string(),
        });
    }

    get_entry(pool, owner_id, id).await
}

/// Delete an entry, owner-scoped.
pub async fn delete_entry(pool: &SqlitePool, owner_id: &str, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM journal_entries
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Entry",
            id: id.to_string(),
        });
    }

    tracing::debug!(entry_id = %id, "Deleted journal entry");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_entry(content: &str) -> NewEntry {
        NewEntry {
            content: content.to_string(),
            summary: Some("A day".to_string()),
            entry_date: None,
            mood: Some(Mood::Happy),
            tags: vec!["work".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_defaults_entry_date_to_today() {
        let db = test_db().await;
        let today = date(2026, 8, 30);

        let entry = create_entry(db.pool(), "user-1", new_entry("Great day at work"), today)
            .await
            .unwrap();

        assert_eq!(entry.entry_date, today);
        assert_eq!(entry.content, "Great day at work");
        assert_eq!(entry.mood, Some(Mood::Happy));
        assert_eq!(entry.tags.0, vec!["work".to_string()]);

        let fetched = get_entry(db.pool(), "user-1", &entry.id).await.unwrap();
        assert_eq!(fetched, entry);
    }

    #[tokio::test]
    async fn test_create_honors_explicit_date() {
        let db = test_db().await;
        let today = date(2026, 8, 30);
        let explicit = date(2026, 8, 27);

        let entry = create_entry(
            db.pool(),
            "user-1",
            NewEntry {
                entry_date: Some(explicit),
                ..new_entry("Backdated reflection")
            },
            today,
        )
        .await
        .unwrap();

        assert_eq!(entry.entry_date, explicit);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_content() {
        let db = test_db().await;
        let result = create_entry(db.pool(), "user-1", new_entry("  "), date(2026, 8, 30)).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_cross_owner_access_is_not_found() {
        let db = test_db().await;
        let entry = create_entry(db.pool(), "user-1", new_entry("Mine"), date(2026, 8, 30))
            .await
            .unwrap();

        let result = get_entry(db.pool(), "user-2", &entry.id).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));

        let result = delete_entry(db.pool(), "user-2", &entry.id).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));

        // Still readable by the owner.
        assert!(get_entry(db.pool(), "user-1", &entry.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let db = test_db().await;
        let entry = create_entry(db.pool(), "user-1", new_entry("Original"), date(2026, 8, 30))
            .await
            .unwrap();

        let updated = update_entry(
            db.pool(),
            "user-1",
            &entry.id,
            EntryPatch {
                mood: Some(Mood::Sad),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // Only mood changed; everything else untouched.
        assert_eq!(updated.mood, Some(Mood::Sad));
        assert_eq!(updated.content, "Original");
        assert_eq!(updated.summary, entry.summary);
        assert_eq!(updated.tags, entry.tags);
        assert!(updated.updated_at >= entry.updated_at);
    }

    #[tokio::test]
    async fn test_query_by_tag_is_exact() {
        let db = test_db().await;
        let today = date(2026, 8, 30);

        create_entry(
            db.pool(),
            "user-1",
            NewEntry {
                tags: vec!["work".to_string()],
                ..new_entry("Office day")
            },
            today,
        )
        .await
        .unwrap();
        create_entry(
            db.pool(),
            "user-1",
            NewEntry {
                tags: vec!["workout".to_string()],
                ..new_entry("Gym day")
            },
            today,
        )
        .await
        .unwrap();

        let filter = EntryFilter {
            since: None,
            search: None,
            tag: Some("work".to_string()),
            limit: 20,
        };
        let results = query_entries(db.pool(), "user-1", &filter).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "Office day");
    }

    #[tokio::test]
    async fn test_query_search_is_case_insensitive_substring() {
        let db = test_db().await;
        let today = date(2026, 8, 30);

        create_entry(db.pool(), "user-1", new_entry("Finished the Project plan"), today)
            .await
            .unwrap();
        create_entry(db.pool(), "user-1", new_entry("Quiet evening walk"), today)
            .await
            .unwrap();

        let filter = EntryFilter {
            since: None,
            search: Some("project".to_string()),
            tag: None,
            limit: 20,
        };
        let results = query_entries(db.pool(), "user-1", &filter).await.unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].content.contains("Project"));
    }

    #[tokio::test]
    async fn test_query_search_treats_wildcards_literally() {
        let db = test_db().await;
        let today = date(2026, 8, 30);

        create_entry(db.pool(), "user-1", new_entry("Hit 100% of my goal"), today)
            .await
            .unwrap();
        create_entry(db.pool(), "user-1", new_entry("Hit 100 reps at the gym"), today)
            .await
            .unwrap();

        // "%" must not act as a pattern wildcard.
        let filter = EntryFilter {
            since: None,
            search: Some("100%".to_string()),
            tag: None,
            limit: 20,
        };
        let results = query_entries(db.pool(), "user-1", &filter).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "Hit 100% of my goal");

        // Same for "_", which would otherwise match any single character.
        let filter = EntryFilter {
            since: None,
            search: Some("100_".to_string()),
            tag: None,
            limit: 20,
        };
        let results = query_entries(db.pool(), "user-1", &filter).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_query_filters_are_conjunctive() {
        let db = test_db().await;
        let today = date(2026, 8, 30);

        create_entry(
            db.pool(),
            "user-1",
            NewEntry {
                entry_date: Some(date(2026, 8, 29)),
                tags: vec!["work".to_string()],
                ..new_entry("project kickoff")
            },
            today,
        )
        .await
        .unwrap();
        create_entry(
            db.pool(),
            "user-1",
            NewEntry {
                entry_date: Some(date(2026, 8, 1)),
                tags: vec!["work".to_string()],
                ..new_entry("old project notes")
            },
            today,
        )
        .await
        .unwrap();

        let filter = EntryFilter {
            since: Some(date(2026, 8, 23)),
            search: Some("project".to_string()),
            tag: Some("work".to_string()),
            limit: 20,
        };
        let results = query_entries(db.pool(), "user-1", &filter).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry_date, date(2026, 8, 29));
    }

    #[tokio::test]
    async fn test_query_orders_newest_entry_date_first() {
        let db = test_db().await;
        let today = date(2026, 8, 30);

        for day in [27, 29, 28] {
            create_entry(
                db.pool(),
                "user-1",
                NewEntry {
                    entry_date: Some(date(2026, 8, day)),
                    ..new_entry("entry")
                },
                today,
            )
            .await
            .unwrap();
        }

        let filter = EntryFilter {
            since: None,
            search: None,
            tag: None,
            limit: 20,
        };
        let results = query_entries(db.pool(), "user-1", &filter).await.unwrap();
        let days: Vec<u32> = results
            .iter()
            .map(|e| {
                use chrono::Datelike;
                e.entry_date.day()
            })
            .collect();
        assert_eq!(days, vec![29, 28, 27]);
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let db = test_db().await;
        let entry = create_entry(db.pool(), "user-1", new_entry("Ephemeral"), date(2026, 8, 30))
            .await
            .unwrap();

        delete_entry(db.pool(), "user-1", &entry.id).await.unwrap();
        let result = get_entry(db.pool(), "user-1", &entry.id).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }
}
