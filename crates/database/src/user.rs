//! User records and bearer-token lookup.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{DatabaseError, Result};
use crate::models::User;

/// Create a user with a fresh id and bearer token.
pub async fn create_user(pool: &SqlitePool, name: &str) -> Result<User> {
    let id = Uuid::new_v4().to_string();
    let token = Uuid::new_v4().to_string();

    sqlx::query(
        r#"
        INSERT INTO users (id, name, token)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(name)
    .bind(&token)
    .execute(pool)
    .await?;

    get_user(pool, &id).await
}

/// Fetch a user by id.
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, token
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    user.ok_or_else(|| DatabaseError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

/// Resolve a bearer token to its user. Unknown tokens return `None`
/// rather than an error so the API can answer 401 without leaking whether
/// the token ever existed.
pub async fn get_user_by_token(pool: &SqlitePool, token: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, token
        FROM users
        WHERE token = ?
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Delete a user.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "User",
            id: id.to_string(),
        });
    }

    Ok(())
}
