//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models. Callers receive the domain types from
//! the `todo` crate, converted with `From`.

use sqlx::FromRow;
use todo::{TodoItem, TodoList, User};

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

/// A persisted user row, without the password hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i32,
    pub name: String,
    pub username: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            username: row.username,
        }
    }
}

// ---------------------------------------------------------------------------
// todo_lists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct TodoListRow {
    pub id: i32,
    pub title: String,
    pub description: String,
}

impl From<TodoListRow> for TodoList {
    fn from(row: TodoListRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
        }
    }
}

// ---------------------------------------------------------------------------
// todo_items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow)]
pub struct TodoItemRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub done: bool,
}

impl From<TodoItemRow> for TodoItem {
    fn from(row: TodoItemRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            done: row.done,
        }
    }
}
