/// Business logic
///
/// - [`auth::AuthService`]: register, login, token verification
/// - [`tasks::TaskService`]: owner-scoped task CRUD and listing order
///
/// Both services receive their dependencies (stores, token secret) through
/// their constructors.

use crate::{
    auth::{jwt::JwtError, middleware::AuthError, password::PasswordError},
    store::StoreError,
};

pub mod auth;
pub mod tasks;

pub use auth::{AuthService, Session};
pub use tasks::TaskService;

/// Error type for service operations
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A required field is missing or empty
    #[error("{0}")]
    Validation(String),

    /// Registration with an email that already exists
    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password; deliberately not told apart
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token missing, malformed, expired, or badly signed
    #[error("{0}")]
    Unauthenticated(AuthError),

    /// Task absent or owned by someone else
    #[error("Task not found")]
    NotFound,

    /// Underlying persistence failure
    #[error("Store failure: {0}")]
    Store(#[source] sqlx::Error),

    /// Password hashing failure
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token signing failure
    #[error(transparent)]
    Token(#[from] JwtError),

    /// Background hashing task panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ServiceError::DuplicateEmail,
            StoreError::Database(e) => ServiceError::Store(e),
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        ServiceError::Unauthenticated(err)
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// False for empty and whitespace-only values
pub(crate) fn has_content(value: &str) -> bool {
    !value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        assert!(matches!(
            ServiceError::from(StoreError::DuplicateEmail),
            ServiceError::DuplicateEmail
        ));
        assert!(matches!(
            ServiceError::from(StoreError::Database(sqlx::Error::PoolTimedOut)),
            ServiceError::Store(_)
        ));
    }

    #[test]
    fn test_unauthenticated_message_comes_from_auth_error() {
        let err = ServiceError::from(AuthError::Expired);
        assert_eq!(err.to_string(), "Token expired");
    }

    #[test]
    fn test_has_content() {
        assert!(has_content("Buy milk"));
        assert!(!has_content(""));
        assert!(!has_content("   "));
    }
}
