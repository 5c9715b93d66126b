//! Storage traits and error types
//!
//! This module defines the trait interface for record stores and
//! associated error types.

use crate::record::BookRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create results directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for record store implementations
///
/// Implementations are shared by every page worker, so they must be safe to
/// call from several threads at once. Methods are synchronous and may block
/// on file I/O; async callers run them on the blocking thread pool
/// (`tokio::task::spawn_blocking`) rather than on a runtime worker.
pub trait RecordStore: Send + Sync {
    /// Writes a record under the given key
    ///
    /// An existing record with the same key is overwritten without warning.
    ///
    /// # Arguments
    ///
    /// * `key` - Filesystem-safe key, usually the sanitized title
    /// * `record` - The record to persist
    ///
    /// # Returns
    ///
    /// The location the record was written to
    fn save(&self, key: &str, record: &BookRecord) -> StorageResult<PathBuf>;

    /// Reads back the record stored under the given key
    fn load(&self, key: &str) -> StorageResult<BookRecord>;
}
