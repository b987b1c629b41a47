//! # fiq-config
//!
//! Layered configuration loading for FormularIQ using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`FORMULARIQ_*` prefix, `__` as separator)
//! 2. Project-level `.formulariq/config.toml`
//! 3. User-level `~/.config/formulariq/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `FORMULARIQ_SERVER__PORT` -> `server.port`,
//! `FORMULARIQ_BACKEND__URLS` -> `backend.urls`, etc. The `__` (double
//! underscore) separates nested config sections. Lists use figment's inline
//! syntax: `FORMULARIQ_BACKEND__URLS='["http://a:8000", "http://b:8000"]'`.
//!
//! # Usage
//!
//! ```no_run
//! use fiq_config::FiqConfig;
//!
//! let config = FiqConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if config.storage.is_configured() {
//!     println!("Archiving under {}", config.storage.root);
//! }
//! ```

mod backend;
mod error;
mod server;
mod storage;
mod study;

pub use backend::BackendConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use storage::StorageConfig;
pub use study::StudyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "FORMULARIQ_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FiqConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub study: StudyConfig,
}

impl FiqConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::file_layers().merge(Self::env_provider())
    }

    /// Reject values that would make the service unusable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "must be between 1 and 65535"));
        }
        for (field, secs) in [
            ("server.request_timeout_secs", self.server.request_timeout_secs),
            ("storage.timeout_secs", self.storage.timeout_secs),
            ("backend.timeout_secs", self.backend.timeout_secs),
            ("server.dialog_idle_secs", self.server.dialog_idle_secs),
        ] {
            if secs == 0 {
                return Err(invalid(field, "must be at least 1 second"));
            }
        }
        if self.server.max_dialog_sessions == 0 {
            return Err(invalid("server.max_dialog_sessions", "must be at least 1"));
        }
        if let Some(url) = self
            .backend
            .urls
            .iter()
            .find(|url| !(url.starts_with("http://") || url.starts_with("https://")))
        {
            return Err(invalid(
                "backend.urls",
                &format!("'{url}' is not an http(s) URL"),
            ));
        }
        if !self.backend.health_path.starts_with('/') {
            return Err(invalid("backend.health_path", "must start with '/'"));
        }
        Ok(())
    }

    /// The backend section, if at least one URL is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] otherwise.
    pub fn require_backend(&self) -> Result<&BackendConfig, ConfigError> {
        if self.backend.is_configured() {
            Ok(&self.backend)
        } else {
            Err(ConfigError::NotConfigured {
                section: "backend".into(),
            })
        }
    }

    fn file_layers() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".formulariq/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed(ENV_PREFIX).split("__")
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("formulariq").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) looking for a `.env`
    /// file, then falls back to the current directory. Missing files are fine.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = FiqConfig::default();
        assert!(!config.storage.is_configured());
        assert!(!config.backend.is_configured());
        assert_eq!(config.server.port, 8000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        let config: FiqConfig = FiqConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.storage.prefix, "formulariq-questionnaire-data");
        assert_eq!(config.backend.health_path, "/health");
    }

    #[test]
    fn validate_rejects_zero_port_and_timeouts() {
        let mut config = FiqConfig::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.port"
        ));

        let mut config = FiqConfig::default();
        config.storage.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "storage.timeout_secs"
        ));
    }

    #[test]
    fn validate_rejects_zero_dialog_limits() {
        let mut config = FiqConfig::default();
        config.server.max_dialog_sessions = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.max_dialog_sessions"
        ));

        let mut config = FiqConfig::default();
        config.server.dialog_idle_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "server.dialog_idle_secs"
        ));
    }

    #[test]
    fn validate_rejects_non_http_backend() {
        let mut config = FiqConfig::default();
        config.backend.urls = vec!["ftp://example.org".into()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn backend_is_required_only_when_asked() {
        let mut config = FiqConfig::default();
        assert!(matches!(
            config.require_backend(),
            Err(ConfigError::NotConfigured { .. })
        ));
        config.backend.urls = vec!["http://localhost:8000".into()];
        assert!(config.require_backend().is_ok());
    }
}
