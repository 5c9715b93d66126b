//! TOML loading for the crawler configuration
//!
//! A config file is read once. The same text is parsed, validated and, when
//! requested, fingerprinted with SHA-256 so the start-up log ties a crawl's
//! results to the exact settings that produced them.

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Reads, parses and validates the configuration file at `path`
///
/// # Example
///
/// ```no_run
/// use book_crawler::config::load_config;
/// use std::path::Path;
///
/// let config = load_config(Path::new("crawler.toml")).unwrap();
/// assert!(config.catalog.total_pages >= 1);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Like [`load_config`], also returning the hex SHA-256 of the file text
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    Ok((config, config_hash(&content)))
}

/// Parses and validates configuration from TOML text
///
/// Missing sections and keys take their defaults.
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config = toml::from_str::<Config>(content)?;
    validate(&config)?;
    Ok(config)
}

/// Hex-encoded SHA-256 digest of configuration text
pub fn config_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}
