use std::sync::Arc;

use anyhow::Context;
use fiq_backend::{BackendClient, CandidateStatus};
use fiq_config::FiqConfig;
use serde::Serialize;

use crate::cli::{BackendCommands, GlobalFlags};
use crate::output::output;

#[derive(Debug, Serialize)]
struct BackendReport {
    candidates: Vec<CandidateStatus>,
    /// First healthy candidate, the one the server would use.
    selected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Handle `fiq backend <action>`.
pub async fn handle(action: &BackendCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        BackendCommands::Check => {
            let config = FiqConfig::load_with_dotenv().context("failed to load configuration")?;
            let backend = config.require_backend()?;
            let client = Arc::new(BackendClient::new(backend)?);

            let candidates = client.check_all().await;
            let (selected, error) = match client.resolve().await {
                Ok(url) => (Some(url), None),
                Err(error) => (None, Some(error.to_string())),
            };
            tracing::debug!(?selected, "backend check finished");
            output(
                &BackendReport {
                    candidates,
                    selected,
                    error,
                },
                flags.format,
            )
        }
    }
}
