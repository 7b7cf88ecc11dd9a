//! Database models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use journal_core::ChatTurn;

/// Mood attached to a journal entry. The symbolic five-level scale is
/// canonical; no integer representation exists anywhere in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
pub enum Mood {
    VerySad,
    Sad,
    Neutral,
    Happy,
    VeryHappy,
}

impl Mood {
    /// All moods in scale order. Used for distribution buckets, which must
    /// always carry all five keys even at zero.
    pub const ALL: [Mood; 5] = [
        Mood::VerySad,
        Mood::Sad,
        Mood::Neutral,
        Mood::Happy,
        Mood::VeryHappy,
    ];

    /// The snake_case wire name for this mood.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::VerySad => "very_sad",
            Mood::Sad => "sad",
            Mood::Neutral => "neutral",
            Mood::Happy => "happy",
            Mood::VeryHappy => "very_happy",
        }
    }
}

/// A journal entry for one calendar day (or explicitly dated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    /// Opaque unique id, generated by the store on creation.
    pub id: String,
    /// Authenticated owner; every read/write is filtered by it.
    pub owner_id: String,
    /// Free-text body, markdown prose.
    pub content: String,
    /// One-line label, at most 100 characters.
    pub summary: Option<String>,
    /// Calendar date the entry belongs to.
    pub entry_date: NaiveDate,
    /// Detected mood, if any.
    pub mood: Option<Mood>,
    /// Short lowercase labels.
    pub tags: Json<Vec<String>>,
    /// Creation timestamp, set by the store.
    pub created_at: String,
    /// Refreshed on every mutation.
    pub updated_at: String,
}

/// A persisted chat session: transcript plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChatSession {
    pub id: String,
    pub owner_id: String,
    /// Short label, populated asynchronously after the first exchange.
    pub title: Option<String>,
    /// Ordered conversation turns, replaced wholesale on each persist.
    pub messages: Json<Vec<ChatTurn>>,
    pub created_at: String,
    pub updated_at: String,
}

/// Session list item without the transcript (payload size).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SessionSummary {
    pub id: String,
    pub title: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// An authenticated user. The API resolves a bearer token to this row
/// once per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Opaque bearer token.
    pub token: String,
}
