//! Structured error types for userctl-core.
//!
//! Uses `thiserror` for better API surface and error composition.
//! The binary crate (userctl-cli) can still use `anyhow` at its edge,
//! but library consumers get structured, composable errors.

use thiserror::Error;

use crate::models::ValidationError;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Main error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Driver or database failure
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A key-based update or delete matched no row
    #[error("{resource} not found for email '{email}'")]
    NotFound {
        resource: &'static str,
        email: String,
    },

    /// Unique-constraint violation on a single-record insert
    #[error("duplicate email '{email}'")]
    Conflict { email: String },

    /// Field rejected at model construction
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Create a not-found error for a missed email key
    pub fn not_found(resource: &'static str, email: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            email: email.into(),
        }
    }

    /// Create a conflict error for a duplicate email
    pub fn conflict(email: impl Into<String>) -> Self {
        Self::Conflict {
            email: email.into(),
        }
    }
}

/// True when the driver classified the failure as a unique-constraint
/// violation (duplicate email in this schema).
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_the_email() {
        let err = StoreError::not_found("user", "ghost@email.com");
        assert_eq!(err.to_string(), "user not found for email 'ghost@email.com'");
    }

    #[test]
    fn conflict_display_names_the_email() {
        let err = StoreError::conflict("alice@email.com");
        assert_eq!(err.to_string(), "duplicate email 'alice@email.com'");
    }

    #[test]
    fn validation_errors_convert() {
        let err: StoreError = ValidationError::Empty { field: "email" }.into();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(err.to_string(), "email cannot be empty");
    }
}
