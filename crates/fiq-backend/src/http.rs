//! Shared HTTP response helpers.

use crate::error::BackendError;

/// Return the response unchanged on success, [`BackendError::Api`] with the
/// body otherwise.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    if !resp.status().is_success() {
        return Err(BackendError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
