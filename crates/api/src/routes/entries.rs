//! Owner-scoped entry CRUD for the entries-browsing UI.
//!
//! Delete lives here only; the agent has no delete tool.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use database::entry::{self, EntryPatch, NewEntry};
use database::{JournalEntry, Mood};

use crate::auth::resolve_identity;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub content: String,
    pub summary: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateEntryRequest {
    pub content: Option<String>,
    pub summary: Option<String>,
    pub entry_date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    pub tags: Option<Vec<String>>,
}

pub async fn list_entries(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<JournalEntry>>, ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    let entries = entry::list_entries(state.db.pool(), &user.id).await?;
    Ok(Json(entries))
}

pub async fn create_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<JournalEntry>), ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    let new = NewEntry {
        content: payload.content,
        summary: payload.summary,
        entry_date: payload.entry_date,
        mood: payload.mood,
        tags: payload.tags,
    };
    let created = entry::create_entry(
        state.db.pool(),
        &user.id,
        new,
        journal_core::dates::today(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<JournalEntry>, ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    let found = entry::get_entry(state.db.pool(), &user.id, &id).await?;
    Ok(Json(found))
}

pub async fn update_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<UpdateEntryRequest>,
) -> Result<Json<JournalEntry>, ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    let patch = EntryPatch {
        content: payload.content,
        summary: payload.summary,
        entry_date: payload.entry_date,
        mood: payload.mood,
        tags: payload.tags,
    };
    let updated = entry::update_entry(state.db.pool(), &user.id, &id, patch).await?;
    Ok(Json(updated))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    entry::delete_entry(state.db.pool(), &user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
