//! `db` crate — pure persistence layer for the todo backend.
//!
//! Provides a connection pool, typed row structs, and repository functions
//! for users, todo lists, and todo items. Every query that touches a list or
//! an item is scoped through the ownership chain
//! (item → `lists_items` → `users_lists` → user) inside the statement itself.
//! No business logic lives here.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;

pub use pool::{DbConfig, DbPool};
pub use error::DbError;
