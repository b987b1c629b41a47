use anyhow::Context;
use fiq_config::FiqConfig;
use serde::Serialize;

use crate::cli::{ConfigCommands, GlobalFlags};
use crate::output::output;

#[derive(Debug, Serialize)]
struct ConfigReport<'a> {
    config: &'a FiqConfig,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Handle `fiq config <action>`.
pub fn handle(action: &ConfigCommands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => {
            let config = FiqConfig::load_with_dotenv().context("failed to load configuration")?;
            let error = config.validate().err().map(|e| e.to_string());
            output(
                &ConfigReport {
                    config: &config,
                    valid: error.is_none(),
                    error,
                },
                flags.format,
            )
        }
    }
}
