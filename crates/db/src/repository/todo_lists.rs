//! Todo list repository functions.
//!
//! Lists are scoped by `users_lists`; a list another user owns is invisible.

use sqlx::{PgPool, Postgres, QueryBuilder};
use todo::{CreateListInput, TodoList, UpdateListInput};
use tracing::{debug, instrument};

use crate::{DbError, models::TodoListRow};

/// Create a list and record `user_id` as its owner in one transaction.
#[instrument(level = "debug", skip(pool, input))]
pub async fn create(pool: &PgPool, user_id: i32, input: &CreateListInput) -> Result<i32, DbError> {
    let mut tx = pool.begin().await?;

    let list_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO todo_lists (title, description)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO users_lists (user_id, list_id) VALUES ($1, $2)")
        .bind(user_id)
        .bind(list_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(list_id)
}

/// Return every list owned by `user_id`, oldest first.
#[instrument(level = "debug", skip(pool))]
pub async fn get_all(pool: &PgPool, user_id: i32) -> Result<Vec<TodoList>, DbError> {
    let rows = sqlx::query_as::<_, TodoListRow>(
        r#"
        SELECT tl.id, tl.title, tl.description
        FROM todo_lists tl
        INNER JOIN users_lists ul ON ul.list_id = tl.id
        WHERE ul.user_id = $1
        ORDER BY tl.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(TodoList::from).collect())
}

#[instrument(level = "debug", skip(pool))]
pub async fn get_by_id(pool: &PgPool, user_id: i32, list_id: i32) -> Result<TodoList, DbError> {
    let row = sqlx::query_as::<_, TodoListRow>(
        r#"
        SELECT tl.id, tl.title, tl.description
        FROM todo_lists tl
        INNER JOIN users_lists ul ON ul.list_id = tl.id
        WHERE ul.user_id = $1 AND ul.list_id = $2
        "#,
    )
    .bind(user_id)
    .bind(list_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row.into())
}

/// Delete a list owned by `user_id`.
///
/// Ownership and item edges cascade away; the item rows themselves stay.
#[instrument(level = "debug", skip(pool))]
pub async fn delete(pool: &PgPool, user_id: i32, list_id: i32) -> Result<u64, DbError> {
    let result = sqlx::query(
        r#"
        DELETE FROM todo_lists tl
        USING users_lists ul
        WHERE tl.id = ul.list_id AND ul.user_id = $1 AND ul.list_id = $2
        "#,
    )
    .bind(user_id)
    .bind(list_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Partial update of a list owned by `user_id`. Same contract as the item
/// update: empty input is rejected, the return value is the rows changed.
#[instrument(level = "debug", skip(pool, input))]
pub async fn update(
    pool: &PgPool,
    user_id: i32,
    list_id: i32,
    input: &UpdateListInput,
) -> Result<u64, DbError> {
    let mut builder = update_query(user_id, list_id, input)?;
    debug!(sql = builder.sql(), "composed list update");

    let result = builder.build().execute(pool).await?;
    Ok(result.rows_affected())
}

fn update_query(
    user_id: i32,
    list_id: i32,
    input: &UpdateListInput,
) -> Result<QueryBuilder<'static, Postgres>, DbError> {
    input.validate()?;

    let mut builder = QueryBuilder::new("UPDATE todo_lists tl SET ");
    {
        let mut set = builder.separated(", ");
        if let Some(title) = &input.title {
            set.push("title = ");
            set.push_bind_unseparated(title.clone());
        }
        if let Some(description) = &input.description {
            set.push("description = ");
            set.push_bind_unseparated(description.clone());
        }
    }
    builder.push(" FROM users_lists ul WHERE tl.id = ul.list_id AND ul.user_id = ");
    builder.push_bind(user_id);
    builder.push(" AND ul.list_id = ");
    builder.push_bind(list_id);

    Ok(builder)
}
