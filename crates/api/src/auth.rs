//! Bearer-token identity resolution.

use axum::http::HeaderMap;

use database::{user, User};

use crate::error::ApiError;
use crate::state::AppState;

/// Resolve the caller's identity from `Authorization: Bearer <token>`.
///
/// Runs before any store or engine work; a missing or unknown token ends
/// the request with 401 and nothing else happens. The resolved [`User`]
/// is passed explicitly to everything downstream.
pub async fn resolve_identity(state: &AppState, headers: &HeaderMap) -> Result<User, ApiError> {
    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Err(ApiError::Unauthorized);
    };
    let Ok(value) = value.to_str() else {
        return Err(ApiError::Unauthorized);
    };
    let Some(token) = value.strip_prefix("Bearer ") else {
        return Err(ApiError::Unauthorized);
    };

    match user::get_user_by_token(state.db.pool(), token).await? {
        Some(user) => Ok(user),
        None => Err(ApiError::Unauthorized),
    }
}
