//! Live Variant B dialogs.
//!
//! Session ids come from the client, so the table is a bounded cache: a
//! dialog idle for longer than the configured window is dropped, and once the
//! table is full the least recently used dialog makes room for a new one.

use std::sync::Arc;
use std::time::Duration;

use fiq_config::ServerConfig;
use fiq_core::CoreError;
use fiq_core::dialog::DialogSession;
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use tokio::sync::Mutex;

/// One dialog, locked while a message is applied to it.
pub type SharedDialog = Arc<Mutex<DialogSession>>;

#[derive(Clone)]
pub struct DialogSessions {
    inner: Cache<String, SharedDialog>,
}

impl DialogSessions {
    #[must_use]
    pub fn new(max_sessions: u64, idle: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_sessions)
                .time_to_idle(idle)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
        }
    }

    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.max_dialog_sessions,
            Duration::from_secs(config.dialog_idle_secs),
        )
    }

    /// Register a freshly started dialog.
    pub async fn insert(&self, session: DialogSession) -> SharedDialog {
        let id = session.id().to_string();
        let shared = Arc::new(Mutex::new(session));
        self.inner.insert(id, Arc::clone(&shared)).await;
        shared
    }

    /// The dialog under `id`, starting a standard one if it is unknown or
    /// has expired.
    ///
    /// # Errors
    ///
    /// Returns the [`CoreError`] from building the standard dialog.
    pub async fn get_or_start(&self, id: &str) -> Result<SharedDialog, Arc<CoreError>> {
        self.inner
            .try_get_with(id.to_string(), async {
                tracing::info!(session_id = %id, "unknown dialog session; starting a new one");
                DialogSession::standard(id).map(|session| Arc::new(Mutex::new(session)))
            })
            .await
    }

    /// Number of live dialogs after pending evictions have run.
    pub async fn live_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}
