//! # fiq-store
//!
//! Archive for FormularIQ study records.
//!
//! The primary store is any [`object_store::ObjectStore`] wrapped in
//! [`ObjectRecordStore`]; a local directory by default. [`Archive`] adds the
//! write timeout and the fallback contract: a record that cannot be written
//! is logged in full and returned to the caller, so the HTTP layer can still
//! answer with success and offer a download.

mod archive;
mod error;
mod store;

pub use archive::{ARCHIVE_TARGET, Archive, ArchiveOutcome, RecordKind, file_name};
pub use error::StoreError;
pub use store::{ObjectRecordStore, RecordStore};
