//! Authentication error types
//!
//! Errors raised while registering users, issuing bearer tokens and
//! resolving a token back to a stored user.
//!
//! # Examples
//!
//! ```rust
//! use orgraph::errors::AuthError;
//!
//! let err = AuthError::TokenExpired;
//! assert!(err.is_authentication_error());
//! assert_eq!(err.to_string(), "Token has expired");
//! ```

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token on a request that requires one
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Token could not be decoded or verified
    #[error("Invalid token")]
    InvalidToken,

    /// Token signature is valid but the expiry has passed
    #[error("Token has expired")]
    TokenExpired,

    /// Username/password pair did not match a stored user
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Token subject does not name a stored user
    #[error("User not found")]
    UserNotFound,

    /// Registration collided with an existing username
    #[error("User already exists")]
    UserAlreadyExists,

    /// Invalid username format
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Hashing or token encoding failed
    #[error("Credential processing failed: {0}")]
    Hashing(String),
}

impl AuthError {
    /// Check if this is an authentication error (401)
    pub fn is_authentication_error(&self) -> bool {
        matches!(
            self,
            AuthError::NotAuthenticated
                | AuthError::InvalidToken
                | AuthError::TokenExpired
                | AuthError::InvalidCredentials
        )
    }

    /// Check if this is a validation error (400)
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            AuthError::UserAlreadyExists
                | AuthError::InvalidUsername(_)
                | AuthError::WeakPassword(_)
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::NotAuthenticated => "NOT_AUTHENTICATED",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::UserAlreadyExists => "USER_ALREADY_EXISTS",
            AuthError::InvalidUsername(_) => "INVALID_USERNAME",
            AuthError::WeakPassword(_) => "WEAK_PASSWORD",
            AuthError::Hashing(_) => "CREDENTIAL_PROCESSING_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuthError::NotAuthenticated.to_string(), "Not authenticated");
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid token");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Incorrect username or password"
        );
        assert_eq!(
            AuthError::WeakPassword("too short".to_string()).to_string(),
            "Password does not meet requirements: too short"
        );
    }

    #[test]
    fn test_error_categories() {
        assert!(AuthError::TokenExpired.is_authentication_error());
        assert!(AuthError::InvalidCredentials.is_authentication_error());
        assert!(!AuthError::UserNotFound.is_authentication_error());

        assert!(AuthError::UserAlreadyExists.is_validation_error());
        assert!(AuthError::InvalidUsername("x".to_string()).is_validation_error());
        assert!(!AuthError::InvalidToken.is_validation_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AuthError::TokenExpired.error_code(), "TOKEN_EXPIRED");
        assert_eq!(AuthError::UserNotFound.error_code(), "USER_NOT_FOUND");
        assert_eq!(
            AuthError::Hashing("x".to_string()).error_code(),
            "CREDENTIAL_PROCESSING_FAILED"
        );
    }
}
