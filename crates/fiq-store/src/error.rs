//! Store error types.

/// Errors from the primary record store.
///
/// None of these reach an HTTP client directly: the archive turns every one
/// of them into a log fallback.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The object store rejected or failed the write.
    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    /// The record could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The write did not finish within the configured timeout.
    #[error("Store write timed out after {secs}s")]
    Timeout { secs: u64 },

    /// No primary store is configured.
    #[error("Storage not configured")]
    NotConfigured,

    /// I/O error preparing the local store directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
