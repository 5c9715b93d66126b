use serde::Deserialize;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://books.toscrape.com";
pub const DEFAULT_TOTAL_PAGES: u32 = 50;
pub const DEFAULT_RESULTS_DIR: &str = "results";
pub const DEFAULT_USER_AGENT: &str = concat!("book-crawler/", env!("CARGO_PKG_VERSION"));

/// Main configuration structure for Book-Crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// The catalog being crawled
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Root of the catalog, index pages live under `<base-url>/catalogue/`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Number of index pages, crawled as the range `1..=total-pages`
    #[serde(rename = "total-pages")]
    pub total_pages: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            total_pages: DEFAULT_TOTAL_PAGES,
        }
    }
}

impl CatalogConfig {
    /// Parses the configured base URL
    pub fn base(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of parallel page workers (0 means available parallelism)
    pub workers: usize,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlerConfig {
    /// Resolves the configured worker count to a concrete pool size
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving one JSON document per book
    #[serde(rename = "results-dir")]
    pub results_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
        }
    }
}
