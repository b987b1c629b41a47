//! Study metadata stamped onto archived records.

use fiq_core::entities::StudyMetadata;
use serde::{Deserialize, Serialize};

fn default_project() -> String {
    String::from("FormularIQ - LLM-gestützte Formularbearbeitung")
}

fn default_institution() -> String {
    String::from("HAW Hamburg")
}

fn default_version() -> String {
    String::from("2.0.0")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudyConfig {
    #[serde(default = "default_project")]
    pub project: String,

    #[serde(default = "default_institution")]
    pub institution: String,

    #[serde(default)]
    pub researcher: String,

    /// Version of the study protocol, not of this software.
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            project: default_project(),
            institution: default_institution(),
            researcher: String::new(),
            version: default_version(),
        }
    }
}

impl StudyConfig {
    #[must_use]
    pub fn metadata(&self) -> StudyMetadata {
        StudyMetadata {
            project: self.project.clone(),
            institution: self.institution.clone(),
            researcher: self.researcher.clone(),
            version: self.version.clone(),
        }
    }
}
