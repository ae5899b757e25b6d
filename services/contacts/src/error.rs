//! Custom error types for the contact book service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::ValidationErrors;

/// Custom error type for the contact book service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload failed validation
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Missing or unknown token
    #[error("Unauthorized")]
    Unauthorized,

    /// Login with an unknown username or a wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The resource does not exist within the caller's ownership chain
    #[error("Not found")]
    NotFound,

    /// Registration with a username that is already taken.
    ///
    /// Rendered under a top-level `error` key instead of `errors`; clients of
    /// the register endpoint depend on that shape.
    #[error("Username already exists")]
    UsernameTaken,

    /// Unexpected failure in a repository or the password hasher
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, message("unauthorized")),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                message("username or password is incorrect"),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, message("not found")),
            ApiError::UsernameTaken => (
                StatusCode::BAD_REQUEST,
                json!({ "error": { "username": ["username already exists"] } }),
            ),
            ApiError::Internal(e) => {
                error!("Internal error: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, message("internal server error"))
            }
        };

        (status, Json(body)).into_response()
    }
}

fn message(text: &str) -> serde_json::Value {
    json!({ "errors": { "message": [text] } })
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let (status, body) = render(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"errors": {"message": ["not found"]}}));
    }

    #[tokio::test]
    async fn test_username_taken_keeps_error_key() {
        let (status, body) = render(ApiError::UsernameTaken).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": {"username": ["username already exists"]}})
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let (status, body) = render(ApiError::from(anyhow::anyhow!("connection reset"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"errors": {"message": ["internal server error"]}})
        );
    }
}
