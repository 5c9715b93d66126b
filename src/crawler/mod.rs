//! Crawler module for catalog page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the [`PageFetcher`] trait
//! - Pattern-based scanning of index and detail pages
//! - The worker pool that runs one work unit per index page
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod pool;

pub use coordinator::{crawl_page, run_crawl, Coordinator, PageReport};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher};
pub use parser::{index_page_url, parse_detail, parse_index};
pub use pool::WorkerPool;

use crate::config::Config;
use crate::CrawlerError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Create the results directory if it does not exist
/// 2. Build the HTTP client
/// 3. Crawl every index page on the worker pool
/// 4. Write one record per fetched detail page
///
/// Only start-up failures are returned; everything that goes wrong while
/// crawling is logged and skipped.
pub async fn crawl(config: Config) -> Result<(), CrawlerError> {
    run_crawl(config).await
}
