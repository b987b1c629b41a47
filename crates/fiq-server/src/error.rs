//! Server error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fiq_core::CoreError;
use serde_json::json;
use thiserror::Error;

/// Errors starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("config error: {0}")]
    Config(#[from] fiq_config::ConfigError),

    #[error("store error: {0}")]
    Store(#[from] fiq_store::StoreError),

    #[error("backend error: {0}")]
    Backend(#[from] fiq_backend::BackendError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A request that could not be handled.
///
/// Upstream failures never end up here; they degrade to a fallback inside
/// the handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Entropy(_) => Self::Internal(error.to_string()),
            other => Self::BadRequest(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "success": false, "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entropy_failure_is_internal() {
        let err = ApiError::from(CoreError::Entropy("no rng".into()));
        assert!(matches!(err, ApiError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_is_bad_request() {
        let err = ApiError::from(CoreError::Validation("empty".into()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
