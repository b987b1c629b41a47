use thiserror::Error;

/// Why a [`crate::FiqConfig`] could not be loaded or used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `FORMULARIQ_*` variable failed to parse or has the wrong type.
    #[error("Failed to load FormularIQ configuration: {0}")]
    Figment(#[from] figment::Error),

    /// The caller needs a section that was left at its empty default.
    #[error("'{section}' is not configured; set it in config.toml or via FORMULARIQ_{}__*", .section.to_uppercase())]
    NotConfigured { section: String },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
