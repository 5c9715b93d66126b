//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the shared HTTP client with the configured user agent
//! - Single GET requests, without retries or custom timeouts
//! - Classifying the outcome and logging every failure
//!
//! Nothing here returns an error to the caller. A failed fetch is logged and
//! reported as a [`FetchResult`] without a body.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// The server answered 200 OK
    Success {
        /// Page body content
        body: String,
    },

    /// The server answered with any status other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport-level failure (connection, DNS, timeout, body decoding)
    NetworkError {
        /// Full error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if the fetch produced a body
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Source of page content for the crawler
///
/// The crawler only depends on this trait, which keeps the network behind a
/// single seam.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches one absolute URL
    ///
    /// Implementations log failures themselves and never panic on network
    /// errors.
    async fn fetch(&self, url: &Url) -> FetchResult;
}

/// Builds an HTTP client with the given user agent
///
/// Timeouts and redirect policy are left at the `reqwest` defaults.
///
/// # Example
///
/// ```no_run
/// use book_crawler::crawler::build_http_client;
///
/// let client = build_http_client("book-crawler/0.1").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 200 | Success with body |
/// | Any other status | HttpError, logged with status and URL |
/// | Connect/DNS/timeout/body error | NetworkError, logged with full detail |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    tracing::info!("Scraping page {}", url);

    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Error occurred while scraping {}: {:?}", url, e);
            return FetchResult::NetworkError {
                error: format!("{:?}", e),
            };
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        tracing::error!(
            "Got invalid status code {} while scraping {}",
            status.as_u16(),
            url
        );
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    if response.url() != url {
        tracing::debug!("{} redirected to {}", url, response.url());
    }

    match response.text().await {
        Ok(body) => FetchResult::Success { body },
        Err(e) => {
            tracing::error!("Error occurred while reading body of {}: {:?}", url, e);
            FetchResult::NetworkError {
                error: format!("{:?}", e),
            }
        }
    }
}

/// [`PageFetcher`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with its own client
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> FetchResult {
        fetch_url(&self.client, url).await
    }
}
