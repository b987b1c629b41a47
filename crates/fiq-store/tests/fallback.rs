//! Archive behaviour against real and broken primary stores.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use fiq_config::StorageConfig;
use fiq_core::enums::StorageMethod;
use fiq_store::{Archive, ObjectRecordStore, RecordKind, RecordStore, StoreError};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Stub stores
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FailingStore {
    attempts: AtomicUsize,
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn put_record(&self, _file_name: &str, _bytes: Vec<u8>) -> Result<String, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Io(std::io::Error::other("bucket unreachable")))
    }

    fn describe(&self) -> String {
        "failing".into()
    }
}

struct SlowStore;

#[async_trait]
impl RecordStore for SlowStore {
    async fn put_record(&self, file_name: &str, _bytes: Vec<u8>) -> Result<String, StoreError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(file_name.to_string())
    }

    fn describe(&self) -> String {
        "slow".into()
    }
}

fn submission() -> Value {
    json!({
        "variant": "A",
        "participantId": "P-042",
        "susResponses": {"sus_1": 4, "sus_2": 2},
        "trustResponses": {"trust_1": 5},
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failing_store_degrades_to_log_with_original_payload() {
    let store = Arc::new(FailingStore::default());
    let archive = Archive::new(store.clone(), Duration::from_secs(5));

    let outcome = archive
        .store(RecordKind::Questionnaire, "P-042", &submission())
        .await;

    assert_eq!(store.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.receipt.method, StorageMethod::LogFallback);
    assert_eq!(outcome.receipt.status(), "logged");
    assert!(
        outcome
            .receipt
            .error
            .as_deref()
            .is_some_and(|e| e.contains("bucket unreachable"))
    );
    assert_eq!(outcome.backup, Some(submission()));
}

#[tokio::test]
async fn slow_store_times_out() {
    let archive = Archive::new(Arc::new(SlowStore), Duration::from_secs(1));

    let outcome = archive
        .store(RecordKind::Form, "P-1", &json!({"values": {}}))
        .await;

    assert_eq!(outcome.receipt.method, StorageMethod::LogFallback);
    assert_eq!(
        outcome.receipt.error.as_deref(),
        Some("Store write timed out after 1s")
    );
    assert!(outcome.backup.is_some());
}

#[tokio::test]
async fn in_memory_store_keeps_the_record() {
    let store = Arc::new(ObjectRecordStore::in_memory("formulariq-questionnaire-data"));
    let archive = Archive::new(store.clone(), Duration::from_secs(5));

    let outcome = archive
        .store(RecordKind::Dialog, "P-9", &submission())
        .await;

    assert!(outcome.is_durable());
    assert_eq!(outcome.receipt.status(), "saved");
    assert_eq!(outcome.backup, None);
    assert!(outcome.receipt.file_name.starts_with("dialog_P-9_"));

    let location = outcome.receipt.location.expect("location");
    let bytes = store
        .inner()
        .get(&location.as_str().into())
        .await
        .unwrap()
        .bytes()
        .await
        .unwrap();
    let stored: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(stored, submission());
}

#[tokio::test]
async fn configured_local_root_writes_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        root: dir.path().join("data").display().to_string(),
        prefix: "records".into(),
        timeout_secs: 5,
    };
    let archive = Archive::from_config(&config).unwrap();
    assert!(archive.is_configured());

    let outcome = archive
        .store(RecordKind::StudyCompletion, "P-3", &json!({"participantId": "P-3"}))
        .await;

    assert_eq!(outcome.receipt.method, StorageMethod::ObjectStore);
    let written = dir
        .path()
        .join("data")
        .join("records")
        .join(&outcome.receipt.file_name);
    let stored: Value = serde_json::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();
    assert_eq!(stored["participantId"], "P-3");
}

#[tokio::test]
async fn unserializable_record_becomes_emergency_backup() {
    let store = Arc::new(FailingStore::default());
    let archive = Archive::new(store.clone(), Duration::from_secs(5));

    // JSON object keys must be strings.
    let mut record = BTreeMap::new();
    record.insert((1_u8, 2_u8), "answer");

    let outcome = archive.store(RecordKind::ErrorReport, "P-5", &record).await;

    assert_eq!(store.attempts.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.receipt.method, StorageMethod::EmergencyBackup);
    let backup = outcome.backup.expect("backup");
    assert!(backup["raw"].as_str().unwrap().contains("answer"));
    assert!(backup["error"].is_string());
}
