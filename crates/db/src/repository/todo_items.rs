//! Todo item repository functions.
//!
//! Every statement is scoped by the full ownership chain:
//! `todo_items` ⋈ `lists_items` ⋈ `users_lists`. An item that exists but
//! belongs to somebody else's list behaves exactly like a missing one.

use sqlx::{PgPool, Postgres, QueryBuilder};
use todo::{CreateItemInput, TodoItem, UpdateItemInput};
use tracing::{debug, instrument};

use crate::{DbError, models::TodoItemRow};

/// Create an item and link it to `list_id` in one transaction.
///
/// Ownership of `list_id` is the caller's concern. If either insert fails the
/// transaction is dropped uncommitted, which rolls both rows back, and the
/// driver error is returned as-is.
#[instrument(level = "debug", skip(pool, input))]
pub async fn create(pool: &PgPool, list_id: i32, input: &CreateItemInput) -> Result<i32, DbError> {
    let mut tx = pool.begin().await?;

    let item_id: i32 = sqlx::query_scalar(
        r#"
        INSERT INTO todo_items (title, description, done)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(&input.title)
    .bind(&input.description)
    .bind(input.done)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO lists_items (list_id, item_id) VALUES ($1, $2)")
        .bind(list_id)
        .bind(item_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(item_id)
}

/// Return every item of `list_id`, provided the list belongs to `user_id`.
///
/// A list the user does not own yields an empty vec, same as an empty list.
#[instrument(level = "debug", skip(pool))]
pub async fn get_all(pool: &PgPool, user_id: i32, list_id: i32) -> Result<Vec<TodoItem>, DbError> {
    let rows = sqlx::query_as::<_, TodoItemRow>(
        r#"
        SELECT ti.id, ti.title, ti.description, ti.done
        FROM todo_items ti
        INNER JOIN lists_items li ON li.item_id = ti.id
        INNER JOIN users_lists ul ON ul.list_id = li.list_id
        WHERE li.list_id = $1 AND ul.user_id = $2
        ORDER BY ti.id ASC
        "#,
    )
    .bind(list_id)
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(TodoItem::from).collect())
}

/// Fetch a single item reachable by `user_id`.
///
/// Returns `DbError::NotFound` when the item is absent or not owned.
#[instrument(level = "debug", skip(pool))]
pub async fn get_by_id(pool: &PgPool, user_id: i32, item_id: i32) -> Result<TodoItem, DbError> {
    let row = sqlx::query_as::<_, TodoItemRow>(
        r#"
        SELECT ti.id, ti.title, ti.description, ti.done
        FROM todo_items ti
        INNER JOIN lists_items li ON li.item_id = ti.id
        INNER JOIN users_lists ul ON ul.list_id = li.list_id
        WHERE ti.id = $1 AND ul.user_id = $2
        "#,
    )
    .bind(item_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row.into())
}

/// Delete an item reachable by `user_id`. The `lists_items` edge goes with
/// it through `ON DELETE CASCADE`.
///
/// Returns the number of items removed; `0` covers both "already gone" and
/// "not yours", so repeating a delete is harmless.
#[instrument(level = "debug", skip(pool))]
pub async fn delete(pool: &PgPool, user_id: i32, item_id: i32) -> Result<u64, DbError> {
    let result = sqlx::query(
        r#"
        DELETE FROM todo_items ti
        USING lists_items li, users_lists ul
        WHERE ti.id = li.item_id AND li.list_id = ul.list_id
          AND ul.user_id = $1 AND ti.id = $2
        "#,
    )
    .bind(user_id)
    .bind(item_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

/// Apply a partial update to an item reachable by `user_id`.
///
/// Only the fields set in `input` are written. An input with no fields is
/// rejected with `DbError::Validation` before anything is sent. Returns the
/// number of rows changed, `0` when the item is absent or not owned.
#[instrument(level = "debug", skip(pool, input))]
pub async fn update(
    pool: &PgPool,
    user_id: i32,
    item_id: i32,
    input: &UpdateItemInput,
) -> Result<u64, DbError> {
    let mut builder = update_query(user_id, item_id, input)?;
    debug!(sql = builder.sql(), "composed item update");

    let result = builder.build().execute(pool).await?;
    Ok(result.rows_affected())
}

/// Build `UPDATE todo_items ... SET <supplied fields> ...` with the owner and
/// item ids as the final two binds.
fn update_query(
    user_id: i32,
    item_id: i32,
    input: &UpdateItemInput,
) -> Result<QueryBuilder<'static, Postgres>, DbError> {
    input.validate()?;

    let mut builder = QueryBuilder::new("UPDATE todo_items ti SET ");
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
        if let Some(done) = input.done {
            set.push("done = ");
            set.push_bind_unseparated(done);
        }
    }
    builder.push(
        " FROM lists_items li, users_lists ul \
         WHERE ti.id = li.item_id AND li.list_id = ul.list_id AND ul.user_id = ",
    );
    builder.push_bind(user_id);
    builder.push(" AND ti.id = ");
    builder.push_bind(item_id);

    Ok(builder)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCOPE: &str = " FROM lists_items li, users_lists ul \
                         WHERE ti.id = li.item_id AND li.list_id = ul.list_id";

    #[test]
    fn done_only_update_touches_one_column() {
        let input = UpdateItemInput {
            done: Some(true),
            ..Default::default()
        };
        let builder = update_query(1, 42, &input).expect("non-empty update");
        assert_eq!(
            builder.sql(),
            format!("UPDATE todo_items ti SET done = $1{SCOPE} AND ul.user_id = $2 AND ti.id = $3")
        );
    }

    #[test]
    fn all_fields_keep_placeholder_order() {
        let input = UpdateItemInput {
            title: Some("Buy milk".into()),
            description: Some("oat".into()),
            done: Some(false),
        };
        let builder = update_query(7, 9, &input).expect("non-empty update");
        assert_eq!(
            builder.sql(),
            format!(
                "UPDATE todo_items ti SET title = $1, description = $2, done = $3{SCOPE} \
                 AND ul.user_id = $4 AND ti.id = $5"
            )
        );
    }

    #[test]
    fn description_only_update_binds_owner_second() {
        let input = UpdateItemInput {
            description: Some(String::new()),
            ..Default::default()
        };
        let builder = update_query(3, 4, &input).expect("non-empty update");
        assert!(builder.sql().starts_with("UPDATE todo_items ti SET description = $1 FROM"));
        assert!(builder.sql().ends_with("ul.user_id = $2 AND ti.id = $3"));
    }

    #[test]
    fn empty_update_is_rejected_before_composing() {
        let err = update_query(1, 1, &UpdateItemInput::default())
            .err()
            .expect("empty update must fail");
        assert!(matches!(
            err,
            DbError::Validation(todo::ValidationError::EmptyUpdate)
        ));
    }
}
