//! Primary record stores.

use std::path::Path as FsPath;
use std::sync::Arc;

use async_trait::async_trait;
use fiq_config::StorageConfig;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{ObjectStore, PutPayload};

use crate::StoreError;

/// Somewhere a serialized record can be written.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Write `bytes` under `file_name` and return the object's location.
    async fn put_record(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, StoreError>;

    /// Short description for health output and logs.
    fn describe(&self) -> String;
}

/// [`RecordStore`] over any `object_store` backend, keyed under a prefix.
#[derive(Debug, Clone)]
pub struct ObjectRecordStore {
    inner: Arc<dyn ObjectStore>,
    prefix: String,
}

impl ObjectRecordStore {
    pub fn new(inner: Arc<dyn ObjectStore>, prefix: &str) -> Self {
        Self {
            inner,
            prefix: prefix.trim_matches('/').to_string(),
        }
    }

    /// A store rooted at a local directory, created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory cannot be created and
    /// [`StoreError::ObjectStore`] if it cannot be opened.
    pub fn local(root: &FsPath, prefix: &str) -> Result<Self, StoreError> {
        std::fs::create_dir_all(root)?;
        let fs = LocalFileSystem::new_with_prefix(root)?;
        Ok(Self::new(Arc::new(fs), prefix))
    }

    /// An in-process store, for tests and dry runs.
    #[must_use]
    pub fn in_memory(prefix: &str) -> Self {
        Self::new(Arc::new(InMemory::new()), prefix)
    }

    /// Build from configuration. `None` when no root is configured.
    ///
    /// # Errors
    ///
    /// Same as [`Self::local`].
    pub fn from_config(config: &StorageConfig) -> Result<Option<Self>, StoreError> {
        if !config.is_configured() {
            return Ok(None);
        }
        Self::local(FsPath::new(&config.root), &config.prefix).map(Some)
    }

    /// Object path for a file name.
    #[must_use]
    pub fn object_path(&self, file_name: &str) -> Path {
        if self.prefix.is_empty() {
            Path::from(file_name)
        } else {
            Path::from(format!("{}/{file_name}", self.prefix))
        }
    }

    /// The underlying store, for reading records back.
    #[must_use]
    pub fn inner(&self) -> &Arc<dyn ObjectStore> {
        &self.inner
    }
}

#[async_trait]
impl RecordStore for ObjectRecordStore {
    async fn put_record(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, StoreError> {
        let path = self.object_path(file_name);
        self.inner.put(&path, PutPayload::from(bytes)).await?;
        Ok(path.to_string())
    }

    fn describe(&self) -> String {
        format!("{} (prefix '{}')", self.inner, self.prefix)
    }
}
