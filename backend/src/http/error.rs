//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::models::time::InvalidTimestamp;

/// API error response body: `{ "success": false, "code", "message", "details"? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub success: bool,
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// A timestamp in the request could not be parsed
    InvalidTimestamp(InvalidTimestamp),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::InvalidTimestamp(e) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_TIMESTAMP", e.to_string()).with_details(e.reason),
            ),
            AppError::Repository(e) => {
                let (status, code) = match &e {
                    RepositoryError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    RepositoryError::ValidationError { .. } => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR"),
                };
                let context = e.context().to_string();
                let error = ApiError::new(code, e.message());
                let error = if context.is_empty() {
                    error
                } else {
                    error.with_details(context.trim().to_string())
                };
                (status, error)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_body();

        if status.is_server_error() {
            tracing::error!(code = %error.code, "{}", error.message);
        } else {
            tracing::debug!(status = status.as_u16(), code = %error.code, "{}", error.message);
        }

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<InvalidTimestamp> for AppError {
    fn from(err: InvalidTimestamp) -> Self {
        AppError::InvalidTimestamp(err)
    }
}
