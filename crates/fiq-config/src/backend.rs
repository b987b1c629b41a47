//! Remote backend configuration.

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    8
}

fn default_health_path() -> String {
    String::from("/health")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Candidate base URLs, tried in order until one answers its health check.
    #[serde(default)]
    pub urls: Vec<String>,

    /// Per-request timeout for backend calls.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Path requested to decide whether a candidate is alive.
    #[serde(default = "default_health_path")]
    pub health_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            timeout_secs: default_timeout_secs(),
            health_path: default_health_path(),
        }
    }
}

impl BackendConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.urls.iter().any(|url| !url.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = BackendConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.health_path, "/health");
        assert_eq!(config.timeout_secs, 8);
    }

    #[test]
    fn blank_urls_do_not_count() {
        let config = BackendConfig {
            urls: vec!["  ".into()],
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
