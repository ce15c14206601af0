//! Robots.txt handling module
//!
//! Robots.txt is used here to enlarge the crawl: sites often name their other
//! language or regional domains in `Allow`, `Disallow`, and `Sitemap` lines.

mod parser;

pub use parser::ParsedRobots;

use crate::crawler::PageFetcher;
use crate::url::{canonicalize_domains, language_prefixes, Domain};
use url::Url;

/// Fetches robots.txt for a domain
///
/// # Returns
///
/// * `Some(ParsedRobots)` - Successfully fetched and parsed robots.txt
/// * `None` - robots.txt is missing or unreadable
pub async fn fetch_robots(fetcher: &dyn PageFetcher, domain: &Domain) -> Option<ParsedRobots> {
    let robots_url = domain.join("/robots.txt");
    tracing::debug!("Fetching robots.txt from {}", robots_url);
    fetcher
        .fetch_robots_txt(&robots_url)
        .await
        .map(|content| ParsedRobots::from_content(&content))
}

/// Resolves the set of base domains to crawl for `root`
///
/// With enlargement disabled, or when robots.txt cannot be read, the result
/// is just the root. Otherwise it is the root plus every origin named in
/// robots.txt directives, collapsed so that each site appears once.
///
/// # Arguments
///
/// * `fetcher` - Used for the relaxed-TLS robots.txt request
/// * `root` - The domain under analysis
/// * `enlargement` - Whether robots.txt may add domains
/// * `allowed_languages` - Language sections whose permission is probed
/// * `user_agent` - User agent for permission checks
pub async fn resolve_domains(
    fetcher: &dyn PageFetcher,
    root: &Domain,
    enlargement: bool,
    allowed_languages: Option<&[String]>,
    user_agent: &str,
) -> Vec<Domain> {
    if !enlargement {
        return vec![root.clone()];
    }

    let Some(robots) = fetch_robots(fetcher, root).await else {
        tracing::warn!("robots.txt unavailable for {}, crawling root only", root);
        return vec![root.clone()];
    };

    let mut candidates: Vec<Domain> = robots
        .affiliated_origins()
        .iter()
        .filter_map(|origin| Domain::parse(origin).ok())
        .collect();

    for prefix in language_prefixes(allowed_languages) {
        let probe = root.join(&prefix);
        if !robots.can_fetch(&probe, user_agent) {
            tracing::debug!("robots.txt disallows {}", probe);
            continue;
        }
        if let Some(domain) = Url::parse(&probe)
            .ok()
            .and_then(|url| Domain::from_url(&url).ok())
        {
            candidates.push(domain);
        }
    }

    let domains = canonicalize_domains(root, candidates);
    tracing::info!(
        "robots.txt enlarged {} to {} domain(s): {}",
        root,
        domains.len(),
        domains
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    domains
}
