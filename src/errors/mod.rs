//! Error types for orgraph
//!
//! Repository and service calls fail with [`ApiError`]. The variants mirror
//! the failure classes callers need to tell apart:
//!
//! - **NotFound** / **Missing**: a lookup by key, name or section found no row
//! - **Duplicate**: a uniqueness rule rejected the write, either by an
//!   application-level pre-check or by the store's own constraint
//! - **BadRequest**: the input was well-formed but semantically invalid
//! - **Auth**: token and credential failures, see [`AuthError`]
//! - **Database**: anything else the store reported
//!
//! # Examples
//!
//! ```rust
//! use orgraph::errors::ApiError;
//!
//! let err = ApiError::not_found("Section", 7);
//! assert_eq!(err.to_string(), "Section with id 7 not found.");
//! assert!(err.is_not_found());
//!
//! let err = ApiError::Duplicate("Section with name 'ops' already exists.".to_string());
//! assert!(err.is_duplicate());
//! ```

pub mod auth;

use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub use auth::AuthError;

/// Errors surfaced by repositories, services and the HTTP layer
#[derive(Error, Debug)]
pub enum ApiError {
    /// No row matched the requested key
    #[error("{entity} with id {key} not found.")]
    NotFound {
        /// Entity kind, e.g. "Section"
        entity: &'static str,
        /// Key that was looked up
        key: String,
    },

    /// Lookup by something other than the key found no row
    #[error("{0}")]
    Missing(String),

    /// Uniqueness violation
    #[error("{0}")]
    Duplicate(String),

    /// Semantically invalid request
    #[error("{0}")]
    BadRequest(String),

    /// Authentication failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(DbErr),
}

/// Result type alias for repository and service operations
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ApiError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn missing(message: impl Into<String>) -> Self {
        ApiError::Missing(message.into())
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        ApiError::Duplicate(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. } | ApiError::Missing(_))
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, ApiError::Duplicate(_))
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, ApiError::BadRequest(_))
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } | ApiError::Missing(_) => "NOT_FOUND",
            ApiError::Duplicate(_) => "DUPLICATE",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Auth(err) => err.error_code(),
            ApiError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        // The store's unique constraints win any race against a pre-check.
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                ApiError::Duplicate(format!("Record already exists: {}", detail))
            }
            _ => ApiError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_entity_and_key() {
        let err = ApiError::not_found("Employee", "5f0c");
        assert_eq!(err.to_string(), "Employee with id 5f0c not found.");
        assert_eq!(err.error_code(), "NOT_FOUND");

        let err = ApiError::missing("Section not found");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Section not found");
    }

    #[test]
    fn test_duplicate_and_not_found_are_distinguishable() {
        let dup = ApiError::duplicate("Link between nodes 1 and 2 already exists.");
        let missing = ApiError::not_found("Node", 1);

        assert!(dup.is_duplicate());
        assert!(!dup.is_not_found());
        assert!(missing.is_not_found());
        assert_ne!(dup.to_string(), missing.to_string());
    }

    #[test]
    fn test_auth_error_is_transparent() {
        let err: ApiError = AuthError::TokenExpired.into();
        assert_eq!(err.to_string(), "Token has expired");
        assert_eq!(err.error_code(), "TOKEN_EXPIRED");
    }

    #[test]
    fn test_plain_db_error_stays_database() {
        let err: ApiError = DbErr::Custom("connection reset".to_string()).into();
        assert!(matches!(err, ApiError::Database(_)));
        assert_eq!(err.error_code(), "DATABASE_ERROR");
    }
}
