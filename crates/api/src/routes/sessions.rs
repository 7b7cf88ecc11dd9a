//! Chat session CRUD.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

use database::session::{self, SessionPatch};
use database::{ChatSession, SessionSummary};
use journal_core::{ChatTurn, Role};

use crate::auth::resolve_identity;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSessionRequest {
    pub messages: Option<Vec<ChatTurn>>,
    pub title: Option<String>,
}

pub async fn list_sessions(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    let sessions = session::list_sessions(state.db.pool(), &user.id).await?;
    Ok(Json(sessions))
}

/// Create a session, usually right after the first exchange. When no
/// title is supplied, title generation runs in the background and updates
/// the row; a failure there is logged and the session stays untitled.
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ChatSession>), ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    let created = session::create_session(
        state.db.pool(),
        &user.id,
        payload.messages,
        payload.title.as_deref(),
    )
    .await?;

    if created.title.is_none() {
        if let Some((user_text, assistant_text)) = first_exchange(&created.messages.0) {
            let agent = state.agent.clone();
            let pool = state.db.pool().clone();
            let owner_id = user.id.clone();
            let session_id = created.id.clone();
            tokio::spawn(async move {
                match agent.generate_title(&user_text, &assistant_text).await {
                    Ok(title) => {
                        let patch = SessionPatch {
                            messages: None,
                            title: Some(title.clone()),
                        };
                        match session::update_session(&pool, &owner_id, &session_id, patch).await {
                            Ok(_) => info!(session_id = %session_id, %title, "Titled session"),
                            Err(e) => {
                                warn!(session_id = %session_id, error = %e, "Failed to store title")
                            }
                        }
                    }
                    Err(e) => {
                        warn!(session_id = %session_id, error = %e, "Title generation failed")
                    }
                }
            });
        }
    }

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<ChatSession>, ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    let found = session::get_session(state.db.pool(), &user.id, &id).await?;
    Ok(Json(found))
}

pub async fn update_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<Json<ChatSession>, ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    let patch = SessionPatch {
        messages: payload.messages,
        title: payload.title,
    };
    let updated = session::update_session(state.db.pool(), &user.id, &id, patch).await?;
    Ok(Json(updated))
}

pub async fn delete_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user = resolve_identity(&state, &headers).await?;
    session::delete_session(state.db.pool(), &user.id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// The first user and assistant texts of a transcript, for titling.
fn first_exchange(messages: &[ChatTurn]) -> Option<(String, String)> {
    let user_text = messages
        .iter()
        .find(|t| t.role == Role::User)
        .map(ChatTurn::text)?;
    let assistant_text = messages
        .iter()
        .find(|t| t.role == Role::Assistant)
        .map(ChatTurn::text)?;
    if user_text.is_empty() || assistant_text.is_empty() {
        return None;
    }
    Some((user_text, assistant_text))
}
