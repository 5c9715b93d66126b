//! Book-Crawler: a catalog crawler for paginated book listings
//!
//! This crate walks the index pages of an online book catalog, follows every
//! listing to its detail page, extracts the book's fields with text patterns
//! and writes one JSON record per book.

pub mod config;
pub mod crawler;
pub mod record;
pub mod storage;

use thiserror::Error;

/// Main error type for Book-Crawler operations
///
/// Only start-up failures surface through this type. Failures while crawling
/// individual pages are logged by the workers and never propagated.
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Book-Crawler operations
pub type Result<T> = std::result::Result<T, CrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, HttpFetcher, PageFetcher};
pub use record::{sanitize_title, BookRecord};
pub use storage::{JsonRecordStore, RecordStore};
