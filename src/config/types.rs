use crate::url::Domain;
use serde::Deserialize;
use std::time::Duration;

/// Browser-like user agent sent with every page request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

/// Main configuration structure for Lingo-Sweep
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

/// Crawl budget and politeness settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CrawlerConfig {
    /// Maximum number of candidate pages per analysis
    pub max_pages: usize,

    /// Maximum number of issues collected per analysis
    pub max_issues: usize,

    /// Pages whose text is not longer than this many characters are skipped
    pub min_content_length: usize,

    /// Delay after each extractor call (milliseconds)
    pub pacing_delay_ms: u64,

    /// Per-request network timeout (seconds)
    pub request_timeout_secs: u64,

    /// Site size used to extrapolate the error estimate in the email
    pub estimated_total_pages: u64,

    /// User agent sent with page and robots.txt requests
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 200,
            max_issues: 7,
            min_content_length: 500,
            pacing_delay_ms: 1000,
            request_timeout_secs: 12,
            estimated_total_pages: 1000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CrawlerConfig {
    pub fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.pacing_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Which parts of a site are in scope
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ScopeConfig {
    /// Allowed language codes; `None` disables language filtering
    pub allowed_languages: Option<Vec<String>>,

    /// Expand the crawl to domains declared in robots.txt
    pub robots_enlargement: bool,
}

/// Language-model settings for the issue extractor
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ExtractorConfig {
    /// Chat model name
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Base URL of the chat-completions API
    pub base_url: String,

    /// Page text is truncated to this many characters before prompting
    pub max_input_chars: usize,

    /// Custom prompt; must contain a `{text}` placeholder
    pub prompt_template: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            temperature: 0.3,
            base_url: "https://api.openai.com/v1".to_string(),
            max_input_chars: 5000,
            prompt_template: None,
        }
    }
}

/// Scope of a single domain analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlScope {
    /// Root domain being analyzed
    pub domain: Domain,

    /// Total page budget across every base domain
    pub max_pages: usize,

    /// Allowed language codes; `None` means no language filtering
    pub allowed_languages: Option<Vec<String>>,

    /// Non-`.com` domains skip language-path filtering entirely
    pub tld_mode: bool,

    /// Expand to domains declared in robots.txt
    pub robots_enlargement: bool,
}

impl CrawlScope {
    /// Builds the scope for `domain` from the loaded configuration
    pub fn for_domain(domain: Domain, config: &Config) -> Self {
        let tld_mode = domain.is_tld_mode();
        Self {
            domain,
            max_pages: config.crawler.max_pages,
            allowed_languages: config.scope.allowed_languages.clone(),
            tld_mode,
            robots_enlargement: config.scope.robots_enlargement,
        }
    }

    /// Language codes to enforce, or `None` when filtering is off
    ///
    /// Filtering is off when no allow-set is configured or in TLD mode.
    pub fn language_filter(&self) -> Option<&[String]> {
        if self.tld_mode {
            return None;
        }
        self.allowed_languages.as_deref()
    }

    /// Returns true if `language` passes the active language filter
    pub fn accepts_language(&self, language: &str) -> bool {
        match self.language_filter() {
            Some(allowed) => allowed.iter().any(|code| code == language),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(domain: &str, languages: Option<Vec<&str>>) -> CrawlScope {
        let mut config = Config::default();
        config.scope.allowed_languages =
            languages.map(|codes| codes.into_iter().map(String::from).collect());
        CrawlScope::for_domain(Domain::parse(domain).unwrap(), &config)
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.crawler.max_pages, 200);
        assert_eq!(config.crawler.max_issues, 7);
        assert_eq!(config.crawler.min_content_length, 500);
        assert_eq!(config.crawler.pacing_delay(), Duration::from_secs(1));
        assert_eq!(config.crawler.request_timeout(), Duration::from_secs(12));
        assert_eq!(config.crawler.estimated_total_pages, 1000);
        assert!(config.scope.allowed_languages.is_none());
        assert!(!config.scope.robots_enlargement);
        assert_eq!(config.extractor.model, "gpt-4o");
    }

    #[test]
    fn test_com_domain_filters_languages() {
        let scope = scope("example.com", Some(vec!["en"]));
        assert!(!scope.tld_mode);
        assert!(scope.accepts_language("en"));
        assert!(!scope.accepts_language("fr"));
        assert!(!scope.accepts_language("unknown"));
    }

    #[test]
    fn test_tld_mode_disables_filter() {
        let scope = scope("example.fr", Some(vec!["en"]));
        assert!(scope.tld_mode);
        assert!(scope.language_filter().is_none());
        assert!(scope.accepts_language("fr"));
    }

    #[test]
    fn test_no_allow_set_accepts_everything() {
        let scope = scope("example.com", None);
        assert!(scope.accepts_language("de"));
        assert!(scope.accepts_language("unknown"));
    }
}
