//! Crawler coordinator - main crawl orchestration logic
//!
//! This module ties the pipeline together:
//! - Enumerating the index pages `1..=total_pages`
//! - Handing one work unit per page to the worker pool
//! - Within a work unit, processing detail links strictly in order:
//!   fetch, parse, derive the storage key, persist
//!
//! Failures stay inside the work unit that hit them. They are logged and the
//! unit moves on; the coordinator itself always finishes normally.

use crate::config::{CatalogConfig, Config};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::parser::{index_page_url, parse_detail, parse_index};
use crate::crawler::pool::WorkerPool;
use crate::record::{storage_key, BookRecord};
use crate::storage::{open_storage, RecordStore, StorageError, StorageResult};
use crate::CrawlerError;
use std::path::PathBuf;
use std::sync::Arc;
use url::Url;

/// Outcome of one page work unit
///
/// Only used for the unit's own summary log line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageReport {
    /// Index page number
    pub page: u32,

    /// False when the index page itself could not be fetched
    pub index_fetched: bool,

    /// Detail links found on the index page
    pub links_found: usize,

    /// Records written to the store
    pub records_saved: usize,

    /// Detail pages that returned no content
    pub fetch_failures: usize,

    /// Records that could not be written
    pub write_failures: usize,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    catalog: CatalogConfig,
    base_url: Arc<Url>,
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn RecordStore>,
    pool: WorkerPool,
}

impl Coordinator {
    /// Creates a coordinator with an HTTP fetcher and a JSON record store
    ///
    /// The results directory is created here, before any page is crawled.
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlerError)` - Invalid base URL, HTTP client or results directory
    pub fn new(config: Config) -> Result<Self, CrawlerError> {
        let fetcher = HttpFetcher::new(&config.crawler.user_agent)?;
        let store = open_storage(&config.output.results_dir)?;
        Self::with_parts(config, Arc::new(fetcher), Arc::new(store))
    }

    /// Creates a coordinator from an explicit fetcher and store
    pub fn with_parts(
        config: Config,
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn RecordStore>,
    ) -> Result<Self, CrawlerError> {
        let base_url = config.catalog.base()?;
        let pool = WorkerPool::new(config.crawler.worker_count());

        Ok(Self {
            catalog: config.catalog,
            base_url: Arc::new(base_url),
            fetcher,
            store,
            pool,
        })
    }

    /// Number of parallel page workers
    pub fn worker_count(&self) -> usize {
        self.pool.size()
    }

    /// Crawls every index page and waits for all work units to finish
    ///
    /// Individual page or link failures are logged by the work units and do
    /// not affect the outcome of the run.
    pub async fn run(&self) {
        let total_pages = self.catalog.total_pages;
        tracing::info!(
            "Starting crawl of {} index pages at {} with {} workers",
            total_pages,
            self.base_url,
            self.pool.size()
        );
        let start_time = std::time::Instant::now();

        let base_url = Arc::clone(&self.base_url);
        let fetcher = Arc::clone(&self.fetcher);
        let store = Arc::clone(&self.store);

        self.pool
            .run(1..=total_pages, move |page| {
                let base_url = Arc::clone(&base_url);
                let fetcher = Arc::clone(&fetcher);
                let store = Arc::clone(&store);
                async move {
                    let report = crawl_page(page, &base_url, fetcher.as_ref(), &store).await;
                    log_report(&report);
                }
            })
            .await;

        tracing::info!("Crawl finished in {:?}", start_time.elapsed());
    }
}

/// Runs one page work unit: the index page and all of its detail pages
///
/// Detail links are processed one after another in the order the index
/// page lists them. Records are written on the blocking thread pool.
pub async fn crawl_page(
    page: u32,
    base_url: &Url,
    fetcher: &dyn PageFetcher,
    store: &Arc<dyn RecordStore>,
) -> PageReport {
    let mut report = PageReport {
        page,
        ..Default::default()
    };

    let index_url = match index_page_url(base_url, page) {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Cannot build URL of index page {}: {}", page, e);
            return report;
        }
    };

    let Some(index_html) = fetcher.fetch(&index_url).await.into_body() else {
        return report;
    };
    report.index_fetched = true;

    let detail_urls: Vec<Url> = parse_index(&index_html, base_url).collect();
    report.links_found = detail_urls.len();

    for detail_url in detail_urls {
        let Some(detail_html) = fetcher.fetch(&detail_url).await.into_body() else {
            report.fetch_failures += 1;
            continue;
        };

        let record = parse_detail(&detail_html);
        tracing::debug!("Got detail data {:?}", record);

        let key = storage_key(&record, &detail_url);
        tracing::info!("Saving record {}", key);
        match save_record(store, key.clone(), record).await {
            Ok(path) => {
                report.records_saved += 1;
                tracing::info!("Record saved to {}", path.display());
            }
            Err(e) => {
                report.write_failures += 1;
                tracing::error!("Failed to save record {} from {}: {}", key, detail_url, e);
            }
        }
    }

    if report.links_found == 0 {
        tracing::info!("No detail links on {}", index_url);
    }

    report
}

/// Writes one record without blocking the async workers
async fn save_record(
    store: &Arc<dyn RecordStore>,
    key: String,
    record: BookRecord,
) -> StorageResult<PathBuf> {
    let store = Arc::clone(store);
    tokio::task::spawn_blocking(move || store.save(&key, &record))
        .await
        .map_err(|e| StorageError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?
}

fn log_report(report: &PageReport) {
    if !report.index_fetched {
        tracing::warn!("Page {}: index page unavailable, skipped", report.page);
        return;
    }

    tracing::info!(
        "Page {}: {} links, {} saved, {} fetch failures, {} write failures",
        report.page,
        report.links_found,
        report.records_saved,
        report.fetch_failures,
        report.write_failures
    );
}

/// Runs the main crawl operation
///
/// # Example
///
/// ```no_run
/// use book_crawler::config::Config;
/// use book_crawler::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// run_crawl(Config::default()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<(), CrawlerError> {
    let coordinator = Coordinator::new(config)?;
    coordinator.run().await;
    Ok(())
}
