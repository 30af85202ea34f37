//! `todo` crate — domain types shared by the persistence layer and its callers.
//!
//! Plain data only: no I/O, no database handles.

pub mod models;
pub mod error;

pub use models::{
    CreateItemInput, CreateListInput, CreateUserInput, TodoItem, TodoList, UpdateItemInput,
    UpdateListInput, User,
};
pub use error::ValidationError;
