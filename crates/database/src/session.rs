//! Chat session CRUD operations.
//!
//! Sessions persist the full transcript as a JSON document; updates replace
//! the transcript wholesale. All operations are owner-scoped, with wrong
//! ownership surfacing as [`DatabaseError::NotFound`].

use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use journal_core::{validate_transcript, ChatTurn};

use crate::error::{DatabaseError, Result};
use crate::models::{ChatSession, SessionSummary};
use crate::validation::validate_title;

/// Partial session update. `messages`, when present, replaces the stored
/// transcript wholesale.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    pub messages: Option<Vec<ChatTurn>>,
    pub title: Option<String>,
}

/// Create a session with an initial (possibly empty) transcript.
pub async fn create_session(
    pool: &SqlitePool,
    owner_id: &str,
    messages: Vec<ChatTurn>,
    title: Option<&str>,
) -> Result<ChatSession> {
    validate_transcript(&messages)?;
    if let Some(title) = title {
        validate_title(title)?;
    }

    let id = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO chat_sessions (id, owner_id, title, messages)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(owner_id)
    .bind(title)
    .bind(Json(messages))
    .execute(pool)
    .await?;

    tracing::debug!(session_id = %id, "Created chat session");

    get_session(pool, owner_id, &id).await
}

/// Fetch one session with its full transcript.
pub async fn get_session(pool: &SqlitePool, owner_id: &str, id: &str) -> Result<ChatSession> {
    let session = sqlx::query_as::<_, ChatSession>(
        r#"
        SELECT id, owner_id, title, messages, created_at, updated_at
        FROM chat_sessions
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    session.ok_or_else(|| DatabaseError::NotFound {
        entity: "Session",
        id: id.to_string(),
    })
}

/// List sessions for an owner as transcript-free summaries, most recently
/// updated first, capped at 50.
pub async fn list_sessions(pool: &SqlitePool, owner_id: &str) -> Result<Vec<SessionSummary>> {
    let sessions = sqlx::query_as::<_, SessionSummary>(
        r#"
        SELECT id, title, created_at, updated_at
        FROM chat_sessions
        WHERE owner_id = ?
        ORDER BY updated_at DESC
        LIMIT 50
        "#,
    )
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// Apply a patch to a session and refresh `updated_at`. A supplied
/// transcript is validated structurally before anything is written.
pub async fn update_session(
    pool: &SqlitePool,
    owner_id: &str,
    id: &str,
    patch: SessionPatch,
) -> Result<ChatSession> {
    if let Some(ref messages) = patch.messages {
        validate_transcript(messages)?;
    }
    if let Some(ref title) = patch.title {
        validate_title(title)?;
    }

    let result = sqlx::query(
        r#"
        UPDATE chat_sessions SET
            messages = COALESCE(?3, messages),
            title = COALESCE(?4, title),
            updated_at = datetime('now')
        WHERE id = ?1 AND owner_id = ?2
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .bind(patch.messages.map(Json))
    .bind(&patch.title)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Session",
            id: id.to_string(),
        });
    }

    get_session(pool, owner_id, id).await
}

/// Delete a session. Journal entries mentioned in the transcript are
/// untouched.
pub async fn delete_session(pool: &SqlitePool, owner_id: &str, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM chat_sessions
        WHERE id = ? AND owner_id = ?
        "#,
    )
    .bind(id)
    .bind(owner_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Session",
            id: id.to_string(),
        });
    }

    tracing::debug!(session_id = %id, "Deleted chat session");
    Ok(())
}
