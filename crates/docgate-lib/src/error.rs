// ============================
// docgate-lib/src/error.rs
// ============================
//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::source::SourceError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("credential source error: {0}")]
    Source(#[from] SourceError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("password protection is not enabled")]
    ProtectionDisabled,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Source(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ProtectionDisabled => StatusCode::NOT_FOUND,
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Source(_) => "Credential source unavailable".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            AppError::ProtectionDisabled => "Resource not found".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}
