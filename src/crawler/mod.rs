//! Crawler module for sampling a site's pages
//!
//! This module contains the core pipeline, including:
//! - HTTP fetching behind the [`PageFetcher`] trait
//! - HTML link extraction and text flattening
//! - One-hop, language-scoped link discovery
//! - Two-pass issue collection
//! - Per-domain analysis coordination

mod analyzer;
mod collector;
mod discovery;
mod fetcher;
mod parser;

#[cfg(test)]
pub(crate) mod testing;

pub use analyzer::{analyze_domain, Analyzer};
pub use collector::{Collection, CollectorSettings, IssueCollector};
pub use discovery::{is_excluded_href, resolve_href, LinkDiscoverer};
pub use fetcher::{
    build_http_client, build_relaxed_client, fetch_url, FetchResult, HttpFetcher, PageFetcher,
};
pub use parser::{extract_hrefs, html_to_text};
