//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::domain::SessionError;
use crate::sessions::RegistryError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Session action rejected
    #[error("{0}")]
    Session(#[from] SessionError),

    /// Path parameter could not be parsed
    #[error("Invalid path parameter: {0}")]
    InvalidPath(#[from] PathRejection),

    /// Request body missing or malformed
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    /// Session lookup or capacity error
    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidPath(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::InvalidBody(e) => (e.status(), "INVALID_BODY"),
            ApiError::Session(e) => match e {
                SessionError::AuthRequired => (StatusCode::UNAUTHORIZED, "AUTH_REQUIRED"),
                SessionError::ChallengeNotFound(_) => {
                    (StatusCode::NOT_FOUND, "CHALLENGE_NOT_FOUND")
                }
                SessionError::InvalidDifficulty(_) | SessionError::InvalidTab(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
                }
            },
            ApiError::Registry(e) => match e {
                RegistryError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
                RegistryError::TooManySessions => {
                    (StatusCode::SERVICE_UNAVAILABLE, "TOO_MANY_SESSIONS")
                }
            },
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        // Client mistakes are warnings, server faults are errors
        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
