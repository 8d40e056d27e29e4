//! HTTP error responses for the liftoff server.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use liftoff_core::Error;
use serde_json::json;

/// Wraps a core [`Error`] so handlers can return it directly.
///
/// Renders as `{"status": "error", "code": .., "message": ..}`.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::FetchFailed(_) => StatusCode::BAD_GATEWAY,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(Error::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self.0 {
            Error::InvalidInput(msg) | Error::FetchFailed(msg) => msg.clone(),
            Error::Config(e) => e.to_string(),
        };

        if status.is_server_error() {
            tracing::error!(code = self.0.code(), %message, "request failed");
        } else {
            tracing::warn!(code = self.0.code(), %message, "request rejected");
        }

        (status, Json(json!({"status": "error", "code": self.0.code(), "message": message}))).into_response()
    }
}
