//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use database::DatabaseError;

/// Errors a handler can return.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or unknown bearer token.
    Unauthorized,
    /// Request body rejected before it reached a store.
    Validation(String),
    /// Store error, mapped by kind (404 for NotFound, 422 for rejected
    /// input, 500 otherwise).
    Database(DatabaseError),
    /// Agent turn failed outside the event stream.
    Agent(agent::AgentError),
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        ApiError::Database(e)
    }
}

impl From<agent::AgentError> for ApiError {
    fn from(e: agent::AgentError) -> Self {
        ApiError::Agent(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Unauthorized => {
                warn!("Unauthorized request");
                (
                    StatusCode::UNAUTHORIZED,
                    "auth_error",
                    "Unauthorized".to_string(),
                )
            }
            ApiError::Validation(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", message)
            }
            ApiError::Database(e @ DatabaseError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, "not_found", e.to_string())
            }
            ApiError::Database(e @ DatabaseError::Validation(_))
            | ApiError::Database(e @ DatabaseError::Transcript(_)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                e.to_string(),
            ),
            ApiError::Database(e) => {
                error!(error = %e, "Database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Internal error".to_string(),
                )
            }
            ApiError::Agent(e) => {
                error!(error = %e, "Agent failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "agent_error",
                    "Internal error".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "message": message,
                "type": kind
            }
        });
        (status, Json(body)).into_response()
    }
}
