//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    InvalidUserId,
    UserNotFound,
    InactiveUser,
    UserLoadError,
    TokenIssueFailed,
    PasswordHashFailed,
}

impl AuthError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authentication credentials were not provided.",
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token",
            ),
            AuthError::InvalidUserId => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid user ID in token",
            ),
            AuthError::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "USER_NOT_FOUND", "User not found")
            }
            AuthError::InactiveUser => (
                StatusCode::UNAUTHORIZED,
                "INACTIVE_USER",
                "This account is not active.",
            ),
            AuthError::UserLoadError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_LOAD_ERROR",
                "Failed to load user",
            ),
            AuthError::TokenIssueFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TOKEN_ISSUE_ERROR",
                "Failed to issue token",
            ),
            AuthError::PasswordHashFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PASSWORD_HASH_ERROR",
                "Failed to process password",
            ),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.parts().2)
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for kanban_common::Error {
    fn from(err: AuthError) -> Self {
        match err.parts().0 {
            StatusCode::UNAUTHORIZED => kanban_common::Error::Authentication(err.to_string()),
            _ => kanban_common::Error::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}
