//! JSON file record store
//!
//! Writes each record as a pretty-printed JSON document named after its
//! storage key inside the results directory.

use crate::record::BookRecord;
use crate::storage::traits::{RecordStore, StorageError, StorageResult};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// File extension of every stored record
pub const RECORD_EXTENSION: &str = "json";

/// Record store writing one JSON file per book
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    results_dir: PathBuf,
}

impl JsonRecordStore {
    /// Opens a store rooted at `results_dir`, creating the directory if absent
    ///
    /// This is the only place the directory is created; writes assume it
    /// exists.
    pub fn open(results_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let results_dir = results_dir.into();
        fs::create_dir_all(&results_dir).map_err(|source| StorageError::CreateDir {
            path: results_dir.clone(),
            source,
        })?;

        tracing::debug!("Results directory ready: {}", results_dir.display());
        Ok(Self { results_dir })
    }

    /// The directory records are written to
    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Path of the document stored under `key`
    pub fn record_path(&self, key: &str) -> PathBuf {
        self.results_dir.join(format!("{}.{}", key, RECORD_EXTENSION))
    }
}

impl RecordStore for JsonRecordStore {
    fn save(&self, key: &str, record: &BookRecord) -> StorageResult<PathBuf> {
        let path = self.record_path(key);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, record)?;
        writer.flush()?;
        Ok(path)
    }

    fn load(&self, key: &str) -> StorageResult<BookRecord> {
        let path = self.record_path(key);
        let file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound(key.to_string()),
            _ => StorageError::Io(e),
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
