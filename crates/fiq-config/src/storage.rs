//! Archive storage configuration.

use serde::{Deserialize, Serialize};

fn default_prefix() -> String {
    String::from("formulariq-questionnaire-data")
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Local directory backing the object store. Empty disables the primary
    /// store and every record goes through the log fallback.
    #[serde(default)]
    pub root: String,

    /// Object key prefix for archived records.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Timeout for a single archive write.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: String::new(),
            prefix: default_prefix(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StorageConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.root.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = StorageConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.prefix, "formulariq-questionnaire-data");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn configured_with_root() {
        let config = StorageConfig {
            root: "/var/lib/formulariq".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
