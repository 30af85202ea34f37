//! Validation errors for domain inputs.

use thiserror::Error;

/// Errors raised when an input cannot be turned into a statement.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A partial update named none of its optional fields.
    #[error("update has no fields to change")]
    EmptyUpdate,
}
