//! Error types for the Rost API.
//!
//! Every handler returns `Result<_, ApiError>`; the `IntoResponse` impl maps
//! each variant to an HTTP status with a JSON `{ "error": ... }` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::upstream::UpstreamError;

/// API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rost_db::DbError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<rost_core::ValidationError> for ApiError {
    fn from(err: rost_core::ValidationError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthFailed(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(rost_db::DbError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(UpstreamError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // 5xx means something on our side broke; 4xx is just request noise
        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        } else {
            warn!(status = %status, error = %self, "Request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result alias for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
