//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::{
    FIELD_USERNAME, MSG_CREDENTIALS_REQUIRED, MSG_INTERNAL_ERROR, MSG_INVALID_CREDENTIALS,
    MSG_INVALID_TOKEN, MSG_USERNAME_TAKEN,
};
use crate::types::ErrorMessage;

/// Per-field validation messages, serialized as `{"field": ["message", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Errors for a single field with a single message.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Replace any messages already recorded for `field`.
    pub fn replace(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), vec![message.into()]);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    #[error("{0}")]
    BadRequest(String),

    // Authentication
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Raised only by `TokenProvider::verify`
    #[error("Token is invalid or expired")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Token type mismatch")]
    WrongTokenType,

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Malformed request body: `{"detail": "..."}`
#[derive(Debug, Serialize)]
struct DetailResponse {
    detail: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) | AppError::MissingCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::InvalidCredentials | AppError::InvalidToken(_) | AppError::WrongTokenType => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            AppError::Validation(errors) => (status, Json(errors)).into_response(),
            AppError::BadRequest(detail) => (status, Json(DetailResponse { detail })).into_response(),
            AppError::MissingCredentials => error_body(status, MSG_CREDENTIALS_REQUIRED),
            AppError::InvalidCredentials => error_body(status, MSG_INVALID_CREDENTIALS),
            AppError::InvalidToken(_) | AppError::WrongTokenType => {
                error_body(status, MSG_INVALID_TOKEN)
            }
            // Hide details for internal errors
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                error_body(status, MSG_INTERNAL_ERROR)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                error_body(status, MSG_INTERNAL_ERROR)
            }
        }
    }
}

fn error_body(status: StatusCode, message: &str) -> Response {
    (status, Json(ErrorMessage::new(message))).into_response()
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }

    /// The username is already taken by another record.
    pub fn username_taken() -> Self {
        AppError::Validation(FieldErrors::single(FIELD_USERNAME, MSG_USERNAME_TAKEN))
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_field_errors_accumulate_per_field() {
        let mut errors = FieldErrors::single("password", "too short");
        errors.add("password", "too common");
        errors.add("username", "taken");

        assert_eq!(errors.get("password").unwrap(), ["too short", "too common"]);
        assert!(errors.contains("username"));
        assert!(!errors.contains("email"));
    }

    #[test]
    fn test_field_errors_replace() {
        let mut errors = FieldErrors::single("username", "too long");
        errors.add("username", "invalid");
        errors.replace("username", "may not be blank");

        assert_eq!(errors.get("username").unwrap(), ["may not be blank"]);
    }

    #[tokio::test]
    async fn test_validation_error_body_is_field_map() {
        let response = AppError::username_taken().into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "username": [MSG_USERNAME_TAKEN] })
        );
    }

    #[tokio::test]
    async fn test_auth_errors_are_flat() {
        let response = AppError::MissingCredentials.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Username and password are required" })
        );

        let response = AppError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await, json!({ "error": "Invalid credentials" }));
    }

    #[tokio::test]
    async fn test_token_errors_are_unauthorized() {
        let response = AppError::WrongTokenType.into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Token is invalid or expired" })
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response = AppError::internal("connection pool exhausted").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "An internal error occurred" })
        );
    }
}
