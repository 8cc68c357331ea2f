//! Error types for todo operations.
//!
//! Every error here is recoverable by whoever invoked the operation; none of
//! them leave the store modified.

use crate::types::TodoId;
use thiserror::Error;

/// Input rejected before it reaches the store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Text was empty or whitespace only
    #[error("Todo text cannot be empty")]
    EmptyText,
}

/// Errors returned by [`TodoStore`](crate::store::TodoStore) operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TodoError {
    /// The supplied arguments were invalid
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No todo has this id
    #[error("Todo with ID {0} not found")]
    NotFound(TodoId),

    /// The id generator produced an id that is already taken
    #[error("Todo with ID {0} already exists")]
    DuplicateId(TodoId),
}

impl TodoError {
    /// Whether this is a [`TodoError::NotFound`]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether this is a [`TodoError::Validation`]
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
