use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::errors::{ApiError, AuthError};

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } | ApiError::Missing(_) => StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Auth(AuthError::UserNotFound) => StatusCode::NOT_FOUND,
            ApiError::Auth(AuthError::Hashing(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(err) if err.is_authentication_error() => StatusCode::UNAUTHORIZED,
            ApiError::Auth(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }

        let body = Json(json!({
            "detail": self.to_string(),
            "code": self.error_code(),
        }));

        let mut response = (status, body).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::not_found("Node", 1).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::duplicate("dup").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::bad_request("No rows to delete.").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AuthError::TokenExpired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::UserNotFound).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(AuthError::UserAlreadyExists).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(DbErr::Custom("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_carries_challenge() {
        let response = ApiError::from(AuthError::NotAuthenticated).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(axum::http::header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
