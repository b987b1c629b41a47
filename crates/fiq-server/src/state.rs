//! Shared application state.

use std::sync::Arc;
use std::time::Duration;

use fiq_backend::{Assistant, BackendClient, RemoteAssistant};
use fiq_config::FiqConfig;
use fiq_store::Archive;

use crate::error::ServerError;
use crate::sessions::DialogSessions;

pub struct AppState {
    pub config: FiqConfig,
    pub archive: Archive,
    pub backend: Arc<BackendClient>,
    pub assistant: Arc<dyn Assistant>,
    /// Live Variant B dialogs by session id.
    pub dialogs: DialogSessions,
}

impl AppState {
    /// Wire up the archive, backend client and remote assistant from config.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError`] if the storage root cannot be opened or the
    /// HTTP client cannot be built.
    pub fn from_config(config: FiqConfig) -> Result<Arc<Self>, ServerError> {
        let archive = Archive::from_config(&config.storage)?;
        let backend = Arc::new(BackendClient::new(&config.backend)?);
        let assistant = Arc::new(RemoteAssistant::new(Arc::clone(&backend)));
        Ok(Self::new(config, archive, backend, assistant))
    }

    #[must_use]
    pub fn new(
        config: FiqConfig,
        archive: Archive,
        backend: Arc<BackendClient>,
        assistant: Arc<dyn Assistant>,
    ) -> Arc<Self> {
        let dialogs = DialogSessions::from_config(&config.server);
        Arc::new(Self {
            config,
            archive,
            backend,
            assistant,
            dialogs,
        })
    }

    /// Budget for one outbound assistant call.
    #[must_use]
    pub const fn assistant_timeout(&self) -> Duration {
        Duration::from_secs(self.config.server.request_timeout_secs)
    }
}
