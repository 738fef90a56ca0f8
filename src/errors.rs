use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::store::StoreError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Conflict(String),
    ValidationError(String),
    TooManyRequests,
    Timeout,
    InternalError(String),
}

impl ApiError {
    /// Machine-readable code sent alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::ValidationError(_) => "BAD_REQUEST",
            ApiError::TooManyRequests => "TOO_MANY_REQUESTS",
            ApiError::Timeout => "TIMEOUT",
            ApiError::InternalError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(format!("No post with id '{}'", id)),
            StoreError::Conflict(id) => {
                ApiError::Conflict(format!("A post with id '{}' already exists", id))
            }
            StoreError::Unavailable(reason) => {
                ApiError::InternalError(format!("store unavailable: {}", reason))
            }
        }
    }
}

/// Convert our custom errors to HTTP responses
///
/// Every body has the same shape: `{ "code": "...", "error": "..." }`
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            ApiError::NotFound(msg) | ApiError::Conflict(msg) | ApiError::ValidationError(msg) => {
                msg
            }
            ApiError::TooManyRequests => "Rate limit exceeded".to_string(),
            ApiError::Timeout => "Request timed out".to_string(),
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
        };

        (
            status,
            Json(serde_json::json!({
              "code": code,
              "error": message
            })),
        )
            .into_response()
    }
}
