//! Configuration module for Book-Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; a missing file section falls back to the defaults,
//! which point at `https://books.toscrape.com` with 50 index pages.
//!
//! # Example
//!
//! ```no_run
//! use book_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawling {} index pages", config.catalog.total_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, CrawlerConfig, OutputConfig};

// Re-export parser functions
pub use parser::{config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
