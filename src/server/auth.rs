//! Request extractors for bearer-token authentication.
//!
//! [`CurrentUser`] rejects the request when the token is missing or bad.
//! [`MaybeUser`] never rejects: any failure resolves to an anonymous caller.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use std::convert::Infallible;

use crate::database::entities::users;
use crate::errors::{ApiError, AuthError};
use crate::server::app::AppState;

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser(pub users::Model);

/// Caller that may or may not have presented a valid token
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<users::Model>);

impl MaybeUser {
    pub fn user_id(&self) -> Option<i32> {
        self.0.as_ref().map(|u| u.id)
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthError::NotAuthenticated)?;
        let user = state.auth.resolve_token(token).await?;
        Ok(CurrentUser(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeUser(None));
        };

        match state.auth.resolve_token(token).await {
            Ok(user) => Ok(MaybeUser(Some(user))),
            Err(err) => {
                tracing::debug!("Treating caller as anonymous: {}", err);
                Ok(MaybeUser(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts(None)), None);
    }
}
