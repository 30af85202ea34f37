//! Typed error type for the db crate.

use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// Anything the driver reports, passed through untouched.
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A row-returning lookup matched nothing inside the caller's ownership chain.
    #[error("row not found")]
    NotFound,

    #[error("invalid input: {0}")]
    Validation(#[from] todo::ValidationError),
}

impl DbError {
    /// True when the database rejected a write because of a constraint
    /// (foreign key, unique, not-null, check).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Self::Sqlx(sqlx::Error::Database(e)) => !matches!(e.kind(), ErrorKind::Other),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_convert() {
        let err: DbError = todo::ValidationError::EmptyUpdate.into();
        assert!(matches!(err, DbError::Validation(todo::ValidationError::EmptyUpdate)));
        assert_eq!(err.to_string(), "invalid input: update has no fields to change");
    }

    #[test]
    fn non_database_errors_are_not_constraint_violations() {
        assert!(!DbError::NotFound.is_constraint_violation());
        assert!(!DbError::Sqlx(sqlx::Error::RowNotFound).is_constraint_violation());
        assert!(!DbError::Sqlx(sqlx::Error::PoolTimedOut).is_constraint_violation());
    }
}
