//! Backend error types.

use thiserror::Error;

/// Errors from talking to the remote backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Response body.
        message: String,
    },

    /// No candidate URL passed its health check.
    #[error("backend unavailable: none of {tried} candidate URL(s) answered")]
    Unavailable { tried: usize },

    /// No backend URL is configured.
    #[error("backend not configured")]
    NotConfigured,

    /// The backend answered with something we could not use.
    #[error("parse error: {0}")]
    Parse(String),
}
