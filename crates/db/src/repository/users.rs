//! User rows. Password hashes are written but never read back.

use sqlx::PgPool;
use todo::{CreateUserInput, User};
use tracing::instrument;

use crate::{DbError, models::UserRow};

/// Insert a user and return its generated id.
#[instrument(level = "debug", skip(pool, input), fields(username = %input.username))]
pub async fn create_user(pool: &PgPool, input: &CreateUserInput) -> Result<i32, DbError> {
    let id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO users (name, username, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&input.name)
    .bind(&input.username)
    .bind(&input.password_hash)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Fetch a single user by primary key.
#[instrument(level = "debug", skip(pool))]
pub async fn get_user(pool: &PgPool, id: i32) -> Result<User, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"SELECT id, name, username FROM users WHERE id = $1"#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row.into())
}
