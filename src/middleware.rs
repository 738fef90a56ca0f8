use axum::{
    BoxError,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{AppState, errors::ApiError};

/// Global token bucket; requests over the quota get 429 without reaching a handler.
pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if state.rate_limiter.check().is_err() {
        warn!(path = %request.uri().path(), "Rate limit exceeded");
        return Err(ApiError::TooManyRequests);
    }

    Ok(next.run(request).await)
}

/// Maps failures from the tower timeout layer into API errors.
pub async fn handle_layer_error(err: BoxError) -> ApiError {
    if err.is::<tower::timeout::error::Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::InternalError(format!("Unhandled middleware error: {}", err))
    }
}
