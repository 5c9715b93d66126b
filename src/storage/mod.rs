//! Storage module for persisting book records
//!
//! Each record becomes one JSON document in the results directory, named
//! after its storage key. Writes are plain overwrites: there is no existence
//! check, no locking and no atomic rename, so two records with the same key
//! leave only the later one on disk.

mod json;
mod traits;

pub use json::{JsonRecordStore, RECORD_EXTENSION};
pub use traits::{RecordStore, StorageError, StorageResult};

use std::path::Path;

/// Opens the JSON record store rooted at `results_dir`
///
/// # Returns
///
/// * `Ok(JsonRecordStore)` - Store ready for writes
/// * `Err(StorageError)` - The results directory could not be created
pub fn open_storage(results_dir: &Path) -> StorageResult<JsonRecordStore> {
    JsonRecordStore::open(results_dir)
}
