//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::validation::{describe, Violation};

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request body")]
    InvalidBody(String),

    #[error("Validation failed")]
    Validation(Vec<Violation>),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("User not found")]
    AccountNotFound(String),

    // Server errors (5xx)
    #[error("Database error")]
    Database(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::InvalidBody(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            // 401 Unauthorized
            AppError::PermissionDenied => StatusCode::UNAUTHORIZED,
            // 404 Not Found
            AppError::AccountNotFound(_) => StatusCode::NOT_FOUND,
            // 500 Internal Server Error
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        let (details, violations) = match self {
            AppError::InvalidBody(detail) => (detail, Vec::new()),
            AppError::Validation(violations) => (describe(&violations), violations),
            AppError::PermissionDenied => ("Invalid password".to_string(), Vec::new()),
            AppError::AccountNotFound(username) => {
                (format!("No active account named {}", username), Vec::new())
            }
            AppError::Database(detail) => (detail, Vec::new()),
        };

        let body = ErrorResponse {
            error,
            details,
            violations,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_denied_maps_to_401() {
        let (status, json) = body_json(AppError::PermissionDenied).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], "Permission denied");
        assert_eq!(json["details"], "Invalid password");
        assert!(json.get("violations").is_none());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, json) = body_json(AppError::AccountNotFound("alice123".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "User not found");
    }

    #[tokio::test]
    async fn test_validation_carries_violation_list() {
        let (status, json) = body_json(AppError::Validation(vec![
            Violation::new("username", "is required"),
            Violation::new("age", "must be between 1 and 255"),
        ]))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(
            json["details"],
            "username: is required; age: must be between 1 and 255"
        );
        assert_eq!(json["violations"][1]["field"], "age");
    }

    #[tokio::test]
    async fn test_database_error_maps_to_500() {
        let (status, json) = body_json(AppError::Database("connection refused".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Database error");
        assert_eq!(json["details"], "connection refused");
    }
}
