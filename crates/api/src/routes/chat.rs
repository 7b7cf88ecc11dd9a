//! The streaming chat endpoint.
//!
//! One request runs one agent turn. The response is SSE with one named
//! event per [`AgentEvent`]; an engine failure shows up as a terminal
//! `error` event on the stream. Identity is resolved before anything
//! streams, so auth failures are plain 401 responses.

use std::convert::Infallible;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tracing::error;

use agent::AgentEvent;
use journal_core::{validate_transcript, ChatTurn, Role};

use crate::auth::resolve_identity;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Prior transcript plus the user's new message, last.
    pub messages: Vec<ChatTurn>,
}

pub async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let user = resolve_identity(&state, &headers).await?;

    if payload.messages.is_empty() {
        return Err(ApiError::Validation("messages must not be empty".to_string()));
    }
    validate_transcript(&payload.messages).map_err(|e| ApiError::Validation(e.to_string()))?;
    let ends_with_user = payload
        .messages
        .last()
        .is_some_and(|turn| turn.role == Role::User);
    if !ends_with_user {
        return Err(ApiError::Validation(
            "last message must be from the user".to_string(),
        ));
    }

    let (tx, rx) = mpsc::channel(64);
    let agent = state.agent.clone();
    let owner_id = user.id.clone();
    let messages = payload.messages;
    tokio::spawn(async move {
        // Failures already reached the client as an error event.
        if let Err(e) = agent.run_turn(&owner_id, &messages, tx).await {
            error!(owner_id = %owner_id, error = %e, "Agent turn failed");
        }
    });

    let stream = ReceiverStream::new(rx).map(|event: AgentEvent| {
        let data = serde_json::to_string(&event).unwrap_or_else(|_| "{}".to_string());
        Ok(Event::default().event(event.name()).data(data))
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
