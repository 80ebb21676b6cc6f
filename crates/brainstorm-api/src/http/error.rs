//! Application error type mapping to HTTP responses.
//!
//! Every error body uses the web client's shape: `{"success": false, "error": "..."}`.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Request-level failure. Turn-level failures are not errors at this layer;
/// they travel as `success: false` in a normal response.
#[derive(Debug)]
pub enum AppError {
    /// Missing or wrong password.
    Unauthorized(String),
    /// Malformed request.
    Validation(String),
    /// Anything else.
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Unauthorized(msg) | AppError::Validation(msg) | AppError::Internal(msg) => msg,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(ref msg) = self {
            tracing::error!(error = %msg, "request failed");
        }
        let body = json!({
            "success": false,
            "error": self.message(),
        });
        (self.status(), Json(body)).into_response()
    }
}
