//! Client for the remote study backend.
//!
//! The backend may be reachable under several base URLs (a local dev server,
//! a hosted deployment). [`BackendClient::resolve`] health-checks them in order and
//! caches the first one that answers its health check; a transport failure
//! on a later call drops the cache so the next call checks again.

use std::time::Duration;

use fiq_config::BackendConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::error::BackendError;
use crate::http::{check_response, join_url};

/// Health of one candidate URL, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateStatus {
    pub url: String,
    pub healthy: bool,
}

#[derive(Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    candidates: Vec<String>,
    health_path: String,
    working: RwLock<Option<String>>,
}

impl BackendClient {
    /// Build a client from the `backend` config section.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("formulariq/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            candidates: config
                .urls
                .iter()
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .collect(),
            health_path: config.health_path.clone(),
            working: RwLock::new(None),
        })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.candidates.is_empty()
    }

    #[must_use]
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The cached working URL, without probing.
    pub async fn cached(&self) -> Option<String> {
        self.working.read().await.clone()
    }

    /// The working base URL, probing candidates in order if none is cached.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotConfigured`] without candidates and
    /// [`BackendError::Unavailable`] when none of them is healthy.
    pub async fn resolve(&self) -> Result<String, BackendError> {
        if let Some(url) = self.cached().await {
            return Ok(url);
        }
        if !self.is_configured() {
            return Err(BackendError::NotConfigured);
        }

        let mut working = self.working.write().await;
        // Another task may have resolved while we waited for the lock.
        if let Some(url) = working.as_ref() {
            return Ok(url.clone());
        }
        for candidate in &self.candidates {
            if self.is_healthy(candidate).await {
                tracing::info!(url = %candidate, "backend resolved");
                *working = Some(candidate.clone());
                return Ok(candidate.clone());
            }
        }
        tracing::warn!(tried = self.candidates.len(), "no backend candidate is healthy");
        Err(BackendError::Unavailable {
            tried: self.candidates.len(),
        })
    }

    /// Forget the cached working URL.
    pub async fn invalidate(&self) {
        if let Some(url) = self.working.write().await.take() {
            tracing::debug!(%url, "backend cache invalidated");
        }
    }

    /// Forget the cache and check again.
    ///
    /// # Errors
    ///
    /// Same as [`Self::resolve`].
    pub async fn retest(&self) -> Result<String, BackendError> {
        self.invalidate().await;
        self.resolve().await
    }

    /// Whether `base` answers its health check with a success status.
    pub async fn is_healthy(&self, base: &str) -> bool {
        let url = join_url(base, &self.health_path);
        match self.http.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(error) => {
                tracing::debug!(%url, %error, "backend health check failed");
                false
            }
        }
    }

    /// Health-check every candidate without touching the cache.
    pub async fn check_all(&self) -> Vec<CandidateStatus> {
        let mut statuses = Vec::with_capacity(self.candidates.len());
        for url in &self.candidates {
            statuses.push(CandidateStatus {
                url: url.clone(),
                healthy: self.is_healthy(url).await,
            });
        }
        statuses
    }

    /// POST `body` as JSON to `path` on the working backend.
    ///
    /// A transport failure invalidates the cached URL before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if no backend resolves, the request fails,
    /// the backend answers with a non-success status, or the body does not
    /// parse as `R`.
    pub async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, BackendError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let base = self.resolve().await?;
        let url = join_url(&base, path);
        let resp = match self.http.post(&url).json(body).send().await {
            Ok(resp) => resp,
            Err(error) => {
                self.invalidate().await;
                return Err(error.into());
            }
        };
        let resp = check_response(resp).await?;
        resp.json::<R>()
            .await
            .map_err(|e| BackendError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(urls: &[&str]) -> BackendConfig {
        BackendConfig {
            urls: urls.iter().map(ToString::to_string).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn candidates_are_trimmed_and_blank_ones_dropped() {
        let client = BackendClient::new(&config(&[" http://a:8000/ ", "", "http://b"])).unwrap();
        assert_eq!(client.candidates(), ["http://a:8000", "http://b"]);
    }

    #[tokio::test]
    async fn resolve_without_candidates_is_not_configured() {
        let client = BackendClient::new(&config(&[])).unwrap();
        assert!(!client.is_configured());
        assert!(matches!(
            client.resolve().await,
            Err(BackendError::NotConfigured)
        ));
    }
}
