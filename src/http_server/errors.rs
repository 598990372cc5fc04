//! # HTTP API Errors
//!
//! Maps search and store failures onto HTTP responses.
//!
//! Internal failures are answered with a fixed generic body; the detail is
//! logged server-side only, so record-store messages never reach a client
//! probing for injection points.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::search::{SearchError, ValidationErrors};
use crate::store::StoreError;

/// Body of every internal failure response
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Body of the missing-settings response
pub const SETTINGS_MISSING_MESSAGE: &str = "Settings record not found";

/// HTTP API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Filter values failed validation
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Singleton settings record is missing
    #[error("Settings record not found")]
    SettingsMissing,

    /// Anything the client cannot fix
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::SettingsMissing => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Validation(errors) => ApiError::Validation(errors),
            SearchError::Configuration(_) => ApiError::SettingsMissing,
            SearchError::Execution(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("blocking task failed: {}", err))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SettingsMissing => ApiError::SettingsMissing,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// `{"errors": [...]}`
#[derive(Debug, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: ValidationErrors,
}

/// `{"error": "..."}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => {
                (status, Json(ValidationErrorResponse { errors })).into_response()
            }
            ApiError::SettingsMissing => (
                status,
                Json(ErrorResponse {
                    error: SETTINGS_MISSING_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            ApiError::Internal(detail) => {
                error!(event = "REQUEST_FAILED", error = %detail);
                (
                    status,
                    Json(ErrorResponse {
                        error: INTERNAL_ERROR_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
