use crate::config::types::{CatalogConfig, Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

const MAX_WORKERS: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.total_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "total-pages must be >= 1, got {}",
            config.total_pages
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // workers == 0 selects available parallelism
    if config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 0 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "results-dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}
