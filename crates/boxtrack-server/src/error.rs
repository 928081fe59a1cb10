// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error-to-HTTP mapping for the API surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use boxtrack_core::BoxtrackError;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Wrapper that maps [`BoxtrackError`] onto HTTP status codes.
#[derive(Debug)]
pub struct ApiError(pub BoxtrackError);

impl From<BoxtrackError> for ApiError {
    fn from(err: BoxtrackError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            BoxtrackError::NotFound { .. } => (StatusCode::NOT_FOUND, self.0.to_string()),
            BoxtrackError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            BoxtrackError::Conflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            BoxtrackError::Unauthorized => (StatusCode::UNAUTHORIZED, self.0.to_string()),
            BoxtrackError::Storage { .. }
            | BoxtrackError::Config(_)
            | BoxtrackError::Internal(_) => {
                // Backend detail stays in the logs, not in the response body.
                tracing::error!(error = %self.0, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
