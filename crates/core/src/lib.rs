//! Shared primitives for the secondhand user service crates.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Result type used across secondhand crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
///
/// Services never swallow one of these; every failure short-circuits the
/// current operation and propagates to the HTTP layer, which owns the
/// status-code mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation targets a user whose active flag is false.
    #[error("user is not active: {0}")]
    NotActive(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn not_active_is_distinct_from_not_found() {
        let not_active = AppError::NotActive("mail@example.com".to_owned());
        let not_found = AppError::NotFound("mail@example.com".to_owned());

        assert!(matches!(not_active, AppError::NotActive(_)));
        assert!(matches!(not_found, AppError::NotFound(_)));
    }

    #[test]
    fn errors_render_their_category() {
        let error = AppError::NotFound("user 42".to_owned());
        assert_eq!(error.to_string(), "not found: user 42");
    }
}
