//! Error types for Plinth core.

use thiserror::Error;

/// Errors that can occur during view registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// The view ID is invalid or the view has been destroyed.
    #[error("invalid or destroyed view ID")]
    InvalidViewId,

    /// Attempted to make a view its own parent or ancestor.
    #[error("cannot set a view as its own parent or ancestor")]
    CircularParentage,
}

/// Result type for view registry operations.
pub type ViewResult<T> = std::result::Result<T, ViewError>;
