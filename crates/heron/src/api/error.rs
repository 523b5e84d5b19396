//! API error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::HeronError;

use super::types::ErrorResponse;

/// An error rendered as an [`ErrorResponse`] with a matching status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                error_type: error_type.into(),
                message: message.into(),
                status_code: status.as_u16(),
            },
        }
    }

    /// 400 for a rejected upload.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BadRequest", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFound", message)
    }

    pub fn internal(error: HeronError) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error_type_name(&error), error.to_string())
    }

    pub fn validation(error: HeronError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_type_name(&error), error.to_string())
    }
}

fn error_type_name(error: &HeronError) -> &'static str {
    match error {
        HeronError::Io(_) => "IoError",
        HeronError::Extraction { .. } => "ExtractionError",
        HeronError::Ocr { .. } => "OcrError",
        HeronError::Validation { .. } => "ValidationError",
        HeronError::MissingDependency(_) => "MissingDependencyError",
        HeronError::Plugin { .. } => "PluginError",
        HeronError::LockPoisoned(_) => "LockPoisonedError",
        HeronError::UnsupportedFormat(_) => "UnsupportedFormatError",
        HeronError::Other(_) => "Error",
    }
}

impl From<HeronError> for ApiError {
    fn from(error: HeronError) -> Self {
        match error {
            HeronError::Validation { .. } | HeronError::UnsupportedFormat(_) => Self::validation(error),
            other => Self::internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
