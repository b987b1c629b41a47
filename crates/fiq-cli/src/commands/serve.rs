use anyhow::Context;
use fiq_config::FiqConfig;

use crate::cli::ServeArgs;

/// Handle `fiq serve`.
pub async fn handle(args: &ServeArgs) -> anyhow::Result<()> {
    let mut config = FiqConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config.validate().context("invalid configuration")?;

    if !config.storage.is_configured() {
        tracing::warn!("storage.root not set; submissions will only be logged");
    }
    if !config.backend.is_configured() {
        tracing::warn!("backend.urls not set; assistant replies will use canned fallbacks");
    }

    fiq_server::serve(config).await.context("server failed")
}
