//! Best-effort archive of study records.
//!
//! [`Archive::store`] never fails. It tries the primary [`RecordStore`] under
//! a timeout. If that does not work it logs the full record at `warn` on the
//! `formulariq::archive` target and hands the record back as a backup for
//! client-side download. If the record cannot even be turned into JSON, the
//! backup carries its debug rendering instead.

use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use fiq_config::StorageConfig;
use fiq_core::enums::StorageMethod;
use fiq_core::responses::StorageReceipt;
use serde::Serialize;
use serde_json::{Value, json};

use crate::{ObjectRecordStore, RecordStore, StoreError};

/// Log target of the fallback sink.
pub const ARCHIVE_TARGET: &str = "formulariq::archive";

const MAX_LABEL_LEN: usize = 64;

/// What kind of record is being archived. Used as the file name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Questionnaire,
    StudyCompletion,
    StudySave,
    Form,
    Dialog,
    ErrorReport,
}

impl RecordKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Questionnaire => "questionnaire",
            Self::StudyCompletion => "study_complete",
            Self::StudySave => "study_save",
            Self::Form => "form",
            Self::Dialog => "dialog",
            Self::ErrorReport => "error_report",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of archiving one record.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveOutcome {
    pub receipt: StorageReceipt,
    /// The record itself, present whenever it did not reach durable storage.
    pub backup: Option<Value>,
}

impl ArchiveOutcome {
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        self.receipt.method.is_durable()
    }
}

#[derive(Clone)]
pub struct Archive {
    store: Option<Arc<dyn RecordStore>>,
    timeout: Duration,
}

impl Debug for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archive")
            .field("store", &self.describe())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Archive {
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>, timeout: Duration) -> Self {
        Self {
            store: Some(store),
            timeout,
        }
    }

    /// An archive with no primary store. Every record goes to the log.
    #[must_use]
    pub const fn log_only() -> Self {
        Self {
            store: None,
            timeout: Duration::from_secs(0),
        }
    }

    /// Build from the `storage` config section.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a root is configured but cannot be opened.
    pub fn from_config(config: &StorageConfig) -> Result<Self, StoreError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        Ok(match ObjectRecordStore::from_config(config)? {
            Some(store) => Self::new(Arc::new(store), timeout),
            None => Self::log_only(),
        })
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    #[must_use]
    pub fn describe(&self) -> String {
        self.store
            .as_ref()
            .map_or_else(|| "log only".to_string(), |store| store.describe())
    }

    /// Archive `record` as `{kind}_{label}_{timestamp}.json`.
    pub async fn store<T>(&self, kind: RecordKind, label: &str, record: &T) -> ArchiveOutcome
    where
        T: Serialize + Debug + ?Sized,
    {
        let file_name = file_name(kind, label, Utc::now());

        let value = match serde_json::to_value(record) {
            Ok(value) => value,
            Err(error) => return emergency(kind, file_name, record, &error),
        };

        match self.write_primary(&file_name, &value).await {
            Ok(location) => {
                tracing::info!(%kind, file = %file_name, %location, "record archived");
                ArchiveOutcome {
                    receipt: StorageReceipt {
                        method: StorageMethod::ObjectStore,
                        file_name,
                        location: Some(location),
                        error: None,
                    },
                    backup: None,
                }
            }
            Err(error) => {
                tracing::warn!(
                    target: ARCHIVE_TARGET,
                    %kind,
                    file = %file_name,
                    %error,
                    record = %value,
                    "primary store unavailable; record logged"
                );
                ArchiveOutcome {
                    receipt: StorageReceipt {
                        method: StorageMethod::LogFallback,
                        file_name,
                        location: None,
                        error: Some(error.to_string()),
                    },
                    backup: Some(value),
                }
            }
        }
    }

    async fn write_primary(&self, file_name: &str, value: &Value) -> Result<String, StoreError> {
        let store = self.store.as_ref().ok_or(StoreError::NotConfigured)?;
        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::time::timeout(self.timeout, store.put_record(file_name, bytes))
            .await
            .map_err(|_| StoreError::Timeout {
                secs: self.timeout.as_secs(),
            })?
    }
}

fn emergency<T>(
    kind: RecordKind,
    file_name: String,
    record: &T,
    error: &serde_json::Error,
) -> ArchiveOutcome
where
    T: Debug + ?Sized,
{
    let raw = format!("{record:?}");
    tracing::error!(
        target: ARCHIVE_TARGET,
        %kind,
        file = %file_name,
        %error,
        %raw,
        "record could not be serialized; emergency backup only"
    );
    ArchiveOutcome {
        receipt: StorageReceipt {
            method: StorageMethod::EmergencyBackup,
            file_name,
            location: None,
            error: Some(error.to_string()),
        },
        backup: Some(json!({
            "raw": raw,
            "error": error.to_string(),
        })),
    }
}

/// `{kind}_{label}_{timestamp}.json` with the label made path-safe.
#[must_use]
pub fn file_name(kind: RecordKind, label: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}_{}_{}.json",
        kind,
        sanitize_segment(label),
        at.format("%Y%m%dT%H%M%S%.3fZ")
    )
}

fn sanitize_segment(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_underscore = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let sanitized = out.trim_matches('_');
    if sanitized.is_empty() {
        return "unknown".to_string();
    }
    sanitized.chars().take(MAX_LABEL_LEN).collect()
}
