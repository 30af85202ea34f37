//! Repository functions — one function per database operation.
//!
//! Every function takes a `&DbPool` and returns a `Result<T, DbError>`.
//! Lists and items are only ever reached through the ownership chain, which
//! is expressed as joins in the statement itself, never as a separate check.
//! Mutations that may match nothing report the affected row count instead of
//! failing, so callers decide what zero means.

pub mod users;
pub mod todo_lists;
pub mod todo_items;
