//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::SammelbandError;

/// Error type returned by the upload handlers.
///
/// Bad requests carry short plain-text bodies the client can show as-is.
/// Conversion failures are logged in full server-side and surfaced as an
/// opaque 500 - no internal paths or parser details leak to the caller.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(SammelbandError),
}

impl From<SammelbandError> for ApiError {
    fn from(err: SammelbandError) -> Self {
        match err {
            SammelbandError::Validation { message } => ApiError::BadRequest(message),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::Internal(err) => {
                tracing::error!("conversion failed: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Conversion failed").into_response()
            }
        }
    }
}
