//! HTTP error mapping for the `/invoke` endpoint

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use screenshot_core::error::CaptureError;
use thiserror::Error;

use crate::protocol::ErrorResponse;

/// Errors returned to `/invoke` callers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was malformed or named something unsupported
    #[error("{0}")]
    BadRequest(String),

    /// A capture step failed
    #[error("Screenshot capture failed: {0}")]
    Capture(CaptureError),

    /// The image was saved but could not be read back
    #[error("Failed to convert image to base64: {0}")]
    Encoding(CaptureError),

    /// The capture task panicked or was cancelled
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// The request named no supported method or tool
    pub fn unsupported() -> Self {
        ApiError::BadRequest("Unsupported method or tool".to_string())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Capture(_) | ApiError::Encoding(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<CaptureError> for ApiError {
    fn from(err: CaptureError) -> Self {
        match err {
            CaptureError::InvalidParameter { .. } => ApiError::BadRequest(err.to_string()),
            CaptureError::ReadImage { .. } => ApiError::Encoding(err),
            _ => ApiError::Capture(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
