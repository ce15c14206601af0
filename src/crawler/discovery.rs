//! Candidate page discovery
//!
//! Discovery is one hop deep: the site root (and one root per allowed
//! language section) is fetched and its links become the candidate list.

use crate::config::CrawlScope;
use crate::crawler::parser::extract_hrefs;
use crate::crawler::PageFetcher;
use crate::language::LanguageDetector;
use crate::url::{language_prefixes, matches_language_path, netloc_of, strip_www, Domain};
use std::collections::HashSet;
use url::Url;

/// Substrings that mark an href as an asset, anchor, or non-page link
const EXCLUDED_HREF_PATTERNS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp", ".css", ".js", "#", "tel:", "mailto:",
];

/// Enumerates in-scope page URLs for one or more base domains
pub struct LinkDiscoverer<'a> {
    fetcher: &'a dyn PageFetcher,
    detector: &'a dyn LanguageDetector,
}

impl<'a> LinkDiscoverer<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, detector: &'a dyn LanguageDetector) -> Self {
        Self { fetcher, detector }
    }

    /// Discovers candidates across every base domain of a scope
    ///
    /// The page budget is split evenly between domains and the combined list
    /// never exceeds `scope.max_pages`.
    pub async fn discover_all(&self, domains: &[Domain], scope: &CrawlScope) -> Vec<String> {
        if domains.is_empty() {
            return Vec::new();
        }

        let per_domain = (scope.max_pages / domains.len()).max(1);
        let mut seen = HashSet::new();
        let mut candidates = Vec::new();

        for domain in domains {
            let found = self
                .discover(
                    domain,
                    per_domain,
                    scope.allowed_languages.as_deref(),
                    scope.tld_mode,
                )
                .await;
            for url in found {
                if candidates.len() >= scope.max_pages {
                    break;
                }
                if seen.insert(url.clone()) {
                    candidates.push(url);
                }
            }
        }

        tracing::info!(
            "Discovered {} candidate page(s) across {} domain(s)",
            candidates.len(),
            domains.len()
        );
        candidates
    }

    /// Discovers up to `max_pages` candidate URLs on `base`
    ///
    /// # Arguments
    ///
    /// * `base` - Domain whose pages are enumerated
    /// * `max_pages` - Upper bound on the returned list
    /// * `allowed_languages` - Language codes to scope to, if any
    /// * `tld_mode` - Disables language scoping when set
    ///
    /// # Returns
    ///
    /// Candidate URLs in discovery order, without duplicates
    pub async fn discover(
        &self,
        base: &Domain,
        max_pages: usize,
        allowed_languages: Option<&[String]>,
        tld_mode: bool,
    ) -> Vec<String> {
        let language_filter = if tld_mode { None } else { allowed_languages };
        let mut seen: HashSet<String> = HashSet::new();
        let mut pages: Vec<String> = Vec::new();

        'prefixes: for prefix in language_prefixes(language_filter) {
            if pages.len() >= max_pages {
                break;
            }

            let listing_url = base.join(&prefix);
            let html = match self.fetcher.fetch_raw_html(&listing_url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", listing_url, e);
                    continue;
                }
            };

            for href in extract_hrefs(&html) {
                if pages.len() >= max_pages {
                    break 'prefixes;
                }

                if is_excluded_href(&href) {
                    continue;
                }
                let Some(candidate) = resolve_href(base, &href) else {
                    continue;
                };
                if !seen.insert(candidate.clone()) {
                    continue;
                }

                if let Some(codes) = language_filter {
                    if !self.in_language_scope(&candidate, codes).await {
                        continue;
                    }
                }

                tracing::debug!("Candidate page: {}", candidate);
                pages.push(candidate);
            }
        }

        pages
    }

    /// Path heuristic first, then content-based confirmation
    async fn in_language_scope(&self, candidate: &str, codes: &[String]) -> bool {
        let path = match Url::parse(candidate) {
            Ok(url) => url.path().to_string(),
            Err(_) => return false,
        };
        if !matches_language_path(&path, codes) {
            return false;
        }

        let text = self.fetcher.fetch_page_text(candidate).await;
        let language = self.detector.detect(&text);
        if codes.iter().any(|code| *code == language) {
            true
        } else {
            tracing::debug!("Dropping {} (detected language: {})", candidate, language);
            false
        }
    }
}

/// Returns true for hrefs pointing at assets, fragments, phone or mail links
pub fn is_excluded_href(href: &str) -> bool {
    EXCLUDED_HREF_PATTERNS
        .iter()
        .any(|pattern| href.contains(pattern))
}

/// Resolves an href against `base`, keeping only same-site links
///
/// Root-relative hrefs are appended to the base. Absolute and
/// protocol-relative hrefs are kept as written when their netloc, ignoring a
/// `www.` prefix, is the base's. Other relative forms are dropped.
pub fn resolve_href(base: &Domain, href: &str) -> Option<String> {
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("{}://{}", base.scheme(), rest)
    } else if href.starts_with('/') {
        return Some(base.join(href));
    } else if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        return None;
    };

    let url = Url::parse(&absolute).ok()?;
    let netloc = netloc_of(&url)?;
    if strip_www(&netloc) == base.bare_netloc() {
        Some(absolute)
    } else {
        None
    }
}
