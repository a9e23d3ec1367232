//! Error types for the Zodo plugin.
//!
//! This module defines the centralized error type [`TodoError`] and a type alias
//! [`Result`] used throughout the crate. The first three variants are the
//! user-facing taxonomy: each one degrades to a visible, recoverable UI state
//! rather than aborting. The remaining variants describe infrastructure failures.

use super::todo::TodoId;
use thiserror::Error;

/// The main error type for Zodo operations.
///
/// # Examples
///
/// ```
/// use zodo::domain::{TodoError, TodoId};
///
/// let err = TodoError::NotFound(TodoId(7));
/// assert_eq!(err.to_string(), "Task #7 not found");
/// assert!(err.is_recoverable());
/// ```
#[derive(Debug, Error)]
pub enum TodoError {
    /// A required form field was left empty on submit.
    ///
    /// Shown inline on the form. The form stays on screen.
    #[error("{0}")]
    Validation(String),

    /// The referenced task no longer exists in the store.
    ///
    /// The detail screen renders a fallback and offers navigation back.
    #[error("Task #{0} not found")]
    NotFound(TodoId),

    /// The initial load of all tasks failed.
    ///
    /// The list renders empty with a retry affordance.
    #[error("Failed to load tasks: {0}")]
    FetchFailure(String),

    /// Reading from or writing to the storage backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A theme could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A string table could not be read or parsed.
    #[error("Strings error: {0}")]
    Strings(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TodoError {
    /// Returns `true` for the user-facing error kinds that map onto a UI
    /// fallback state instead of an infrastructure failure.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::FetchFailure(_)
        )
    }
}

/// A specialized `Result` type for Zodo operations.
pub type Result<T> = std::result::Result<T, TodoError>;
