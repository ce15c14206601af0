//! Two-pass issue collection
//!
//! The strict pass walks the candidate list asking only for substantive
//! issues. When it ends below the issue cap, a relaxed pass walks the same
//! list again and also accepts punctuation and spacing findings. Both passes
//! share the dedup set, and each one is a fold over a [`Collection`].

use crate::config::{CrawlScope, CrawlerConfig};
use crate::crawler::PageFetcher;
use crate::extractor::{is_minor_issue, IssueExtractor, Strictness};
use crate::language::LanguageDetector;
use crate::report::{dedup_key_of, IssueRecord};
use std::collections::HashSet;
use std::time::Duration;

/// Limits applied while collecting issues
#[derive(Debug, Clone)]
pub struct CollectorSettings {
    /// Stop once this many issues are held
    pub max_issues: usize,

    /// Pages with this many characters or fewer are skipped
    pub min_content_length: usize,

    /// Pause after each extractor call
    pub pacing_delay: Duration,
}

impl CollectorSettings {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            max_issues: config.max_issues,
            min_content_length: config.min_content_length,
            pacing_delay: config.pacing_delay(),
        }
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }
}

/// Issues accumulated across passes
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Accepted issues, in acceptance order
    pub issues: Vec<IssueRecord>,

    /// Number of accepted issues
    pub total_errors: usize,

    /// Pages that produced an accepted issue
    pub pages_used: usize,

    seen_keys: HashSet<String>,
}

impl Collection {
    /// Accepts an issue unless its dedup key was already seen
    fn accept(&mut self, issue: IssueRecord) -> bool {
        if !self.seen_keys.insert(issue.dedup_key().to_string()) {
            return false;
        }
        self.issues.push(issue);
        self.total_errors += 1;
        self.pages_used += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Walks candidate pages and gathers deduplicated issues
pub struct IssueCollector<'a> {
    fetcher: &'a dyn PageFetcher,
    detector: &'a dyn LanguageDetector,
    extractor: &'a dyn IssueExtractor,
    settings: CollectorSettings,
}

impl<'a> IssueCollector<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        detector: &'a dyn LanguageDetector,
        extractor: &'a dyn IssueExtractor,
        settings: CollectorSettings,
    ) -> Self {
        Self {
            fetcher,
            detector,
            extractor,
            settings,
        }
    }

    /// Runs the strict pass, then the relaxed pass if still under the cap
    ///
    /// # Arguments
    ///
    /// * `candidates` - Candidate URLs, in discovery order
    /// * `scope` - Scope whose language filter applies to each page
    /// * `prompt_template` - Template handed to the extractor
    ///
    /// # Returns
    ///
    /// The accumulated [`Collection`], holding at most `max_issues` issues
    pub async fn collect(
        &self,
        candidates: &[String],
        scope: &CrawlScope,
        prompt_template: &str,
    ) -> Collection {
        let (collection, full) = self
            .run_pass(
                Collection::default(),
                candidates,
                scope,
                prompt_template,
                Strictness::Strict,
            )
            .await;
        tracing::info!(
            "Strict pass accepted {} issue(s) from {} candidate(s)",
            collection.len(),
            candidates.len()
        );
        if full {
            return collection;
        }

        let before = collection.len();
        let (collection, _) = self
            .run_pass(
                collection,
                candidates,
                scope,
                prompt_template,
                Strictness::AllowMinor,
            )
            .await;
        tracing::info!("Relaxed pass accepted {} more issue(s)", collection.len() - before);
        collection
    }

    /// One pass over the candidates; returns the collection and whether the cap was reached
    pub async fn run_pass(
        &self,
        mut collection: Collection,
        candidates: &[String],
        scope: &CrawlScope,
        prompt_template: &str,
        strictness: Strictness,
    ) -> (Collection, bool) {
        if collection.len() >= self.settings.max_issues {
            return (collection, true);
        }

        for url in candidates {
            let text = self.fetcher.fetch_page_text(url).await;
            let language = self.detector.detect(&text);

            if !scope.accepts_language(&language) {
                tracing::debug!("Skipping {} (language {})", url, language);
                continue;
            }
            if text.chars().count() <= self.settings.min_content_length {
                tracing::debug!("Skipping {} (too little content)", url);
                continue;
            }

            let response = self
                .extractor
                .extract_issue(&text, prompt_template, strictness)
                .await;

            if let Some(issue) = self.evaluate(&response, url, &language, strictness) {
                if collection.accept(issue) {
                    tracing::debug!("Accepted issue from {}", url);
                    if collection.len() >= self.settings.max_issues {
                        return (collection, true);
                    }
                } else {
                    tracing::debug!("Duplicate issue from {}", url);
                }
            }

            if !self.settings.pacing_delay.is_zero() {
                tokio::time::sleep(self.settings.pacing_delay).await;
            }
        }

        (collection, false)
    }

    /// Parses a response if it passes the strictness filter and carries the marker
    fn evaluate(
        &self,
        response: &str,
        url: &str,
        language: &str,
        strictness: Strictness,
    ) -> Option<IssueRecord> {
        if response.trim().is_empty() {
            return None;
        }
        if strictness == Strictness::Strict && is_minor_issue(response) {
            tracing::debug!("Rejected minor issue from {}", url);
            return None;
        }
        dedup_key_of(response)?;
        IssueRecord::from_response(response, url, language)
    }
}
