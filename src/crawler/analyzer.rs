//! Per-domain analysis
//!
//! The analyzer wires robots enlargement, link discovery, issue collection,
//! and email composition into one call per domain.

use crate::config::{validate, Config, CrawlScope};
use crate::crawler::collector::{CollectorSettings, IssueCollector};
use crate::crawler::discovery::LinkDiscoverer;
use crate::crawler::{HttpFetcher, PageFetcher};
use crate::extractor::{IssueExtractor, OpenAiExtractor, DEFAULT_PROMPT_TEMPLATE};
use crate::language::{LanguageDetector, WhatlangDetector};
use crate::report::{estimate_total_errors, RandomSelector, Report, ReportComposer};
use crate::robots::resolve_domains;
use crate::url::Domain;
use crate::Result;
use std::sync::Arc;
use tracing::info;

/// Reusable analysis pipeline
///
/// Holds no per-analysis state, so one analyzer can process many domains in
/// turn.
#[derive(Clone)]
pub struct Analyzer {
    config: Config,
    fetcher: Arc<dyn PageFetcher>,
    detector: Arc<dyn LanguageDetector>,
    extractor: Arc<dyn IssueExtractor>,
    prompt_template: String,
    phrase_seed: Option<u64>,
}

impl Analyzer {
    /// Creates an analyzer with the HTTP fetcher, whatlang detector, and
    /// OpenAI extractor
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration
    /// * `api_key` - Key for the chat-completions API
    ///
    /// # Returns
    ///
    /// * `Ok(Analyzer)` - Ready to analyze domains
    /// * `Err(SweepError::MissingApiKey)` - The key is blank
    pub fn new(config: Config, api_key: &str) -> Result<Self> {
        let extractor = OpenAiExtractor::new(api_key, &config.extractor)?;
        let fetcher = HttpFetcher::new(&config.crawler)?;
        Self::with_components(
            config,
            Arc::new(fetcher),
            Arc::new(WhatlangDetector::new()),
            Arc::new(extractor),
        )
    }

    /// Creates an analyzer from explicit collaborators
    ///
    /// The configuration is validated here, so every analyzer runs with a
    /// usable prompt template and limits.
    pub fn with_components(
        config: Config,
        fetcher: Arc<dyn PageFetcher>,
        detector: Arc<dyn LanguageDetector>,
        extractor: Arc<dyn IssueExtractor>,
    ) -> Result<Self> {
        validate(&config)?;

        let prompt_template = config
            .extractor
            .prompt_template
            .clone()
            .unwrap_or_else(|| DEFAULT_PROMPT_TEMPLATE.to_string());

        Ok(Self {
            config,
            fetcher,
            detector,
            extractor,
            prompt_template,
            phrase_seed: None,
        })
    }

    /// Makes email phrasing reproducible
    pub fn with_phrase_seed(mut self, seed: u64) -> Self {
        self.phrase_seed = Some(seed);
        self
    }

    /// Analyzes one domain and composes its report
    ///
    /// Only invalid domain input is an error; unreachable pages, robots.txt,
    /// or extractor failures shrink the sample instead.
    pub async fn analyze(&self, domain_input: &str) -> Result<Report> {
        let domain = Domain::parse(domain_input)?;
        let scope = CrawlScope::for_domain(domain.clone(), &self.config);
        info!(
            "Analyzing {} (tld mode: {}, languages: {:?})",
            domain,
            scope.tld_mode,
            scope.language_filter()
        );

        let domains = resolve_domains(
            self.fetcher.as_ref(),
            &domain,
            scope.robots_enlargement,
            scope.allowed_languages.as_deref(),
            &self.config.crawler.user_agent,
        )
        .await;

        let discoverer = LinkDiscoverer::new(self.fetcher.as_ref(), self.detector.as_ref());
        let candidates = discoverer.discover_all(&domains, &scope).await;

        let collector = IssueCollector::new(
            self.fetcher.as_ref(),
            self.detector.as_ref(),
            self.extractor.as_ref(),
            CollectorSettings::from_config(&self.config.crawler),
        );
        let collection = collector
            .collect(&candidates, &scope, &self.prompt_template)
            .await;

        let selector = match self.phrase_seed {
            Some(seed) => RandomSelector::seeded(seed),
            None => RandomSelector::from_entropy(),
        };
        let email = ReportComposer::new(selector).compose(
            domain.netloc(),
            &collection.issues,
            collection.total_errors,
            collection.pages_used,
            self.config.crawler.estimated_total_pages,
        );

        info!(
            "Finished {}: {} issue(s) from {} candidate page(s)",
            domain,
            collection.total_errors,
            candidates.len()
        );

        Ok(Report {
            domain,
            email,
            issues: collection.issues,
            total_errors: collection.total_errors,
            pages_used: collection.pages_used,
            candidates: candidates.len(),
            estimated_total_errors: estimate_total_errors(
                collection.total_errors,
                collection.pages_used,
                self.config.crawler.estimated_total_pages,
            ),
        })
    }
}

/// Analyzes a single domain with the default collaborators
///
/// # Example
///
/// ```no_run
/// use lingo_sweep::{analyze_domain, Config};
///
/// # async fn run() -> lingo_sweep::Result<()> {
/// let report = analyze_domain("example.com", "sk-...", Config::default()).await?;
/// println!("{}", report.email);
/// # Ok(())
/// # }
/// ```
pub async fn analyze_domain(domain: &str, api_key: &str, config: Config) -> Result<Report> {
    Analyzer::new(config, api_key)?.analyze(domain).await
}
