//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests made against the analyzed site:
//! - Raw HTML fetches used for link discovery
//! - Plain-text page fetches used for language detection and extraction
//! - Relaxed-TLS robots.txt fetches
//!
//! Failures never escape the text and robots fetches; they become empty
//! results so that one bad page cannot stop an analysis.

use crate::config::CrawlerConfig;
use crate::crawler::parser::html_to_text;
use crate::SweepError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};

/// Retrieves pages for the crawl pipeline
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the raw HTML of a page
    ///
    /// Network errors and non-success statuses are returned as errors.
    async fn fetch_raw_html(&self, url: &str) -> Result<String, SweepError>;

    /// Fetches a page and flattens it to plain text
    ///
    /// Script, style, and noscript content is removed. Any failure yields an
    /// empty string.
    async fn fetch_page_text(&self, url: &str) -> String;

    /// Fetches robots.txt without certificate validation
    ///
    /// Returns `None` on any failure.
    async fn fetch_robots_txt(&self, url: &str) -> Option<String>;
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Response body
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client used for page requests
///
/// # Example
///
/// ```no_run
/// use lingo_sweep::config::CrawlerConfig;
/// use lingo_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout())
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Builds the client used for robots.txt, which skips certificate validation
pub fn build_relaxed_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout())
        .redirect(Policy::limited(10))
        .danger_accept_invalid_certs(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// No retries are attempted: a failed page is simply skipped by the caller.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: "Connection refused".to_string(),
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// reqwest-backed [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    relaxed_client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher from the crawler configuration
    pub fn new(config: &CrawlerConfig) -> Result<Self, SweepError> {
        Ok(Self {
            client: build_http_client(config)?,
            relaxed_client: build_relaxed_client(config)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_raw_html(&self, url: &str) -> Result<String, SweepError> {
        match fetch_url(&self.client, url).await {
            FetchResult::Success { body, .. } => Ok(body),
            FetchResult::HttpError { status_code } => Err(SweepError::HttpStatus {
                url: url.to_string(),
                status: status_code,
            }),
            FetchResult::NetworkError { error } => Err(SweepError::Fetch {
                url: url.to_string(),
                message: error,
            }),
        }
    }

    async fn fetch_page_text(&self, url: &str) -> String {
        match fetch_url(&self.client, url).await {
            FetchResult::Success {
                body, final_url, ..
            } => {
                if final_url != url {
                    tracing::trace!("{} redirected to {}", url, final_url);
                }
                html_to_text(&body)
            }
            FetchResult::HttpError { status_code } => {
                tracing::debug!("HTTP {} for {}", status_code, url);
                String::new()
            }
            FetchResult::NetworkError { error } => {
                tracing::debug!("Fetch failed for {}: {}", url, error);
                String::new()
            }
        }
    }

    async fn fetch_robots_txt(&self, url: &str) -> Option<String> {
        match fetch_url(&self.relaxed_client, url).await {
            FetchResult::Success { body, .. } => Some(body),
            FetchResult::HttpError { status_code } => {
                tracing::debug!("robots.txt returned HTTP {} at {}", status_code, url);
                None
            }
            FetchResult::NetworkError { error } => {
                tracing::debug!("robots.txt fetch failed at {}: {}", url, error);
                None
            }
        }
    }
}
