//! Robots.txt parser implementation
//!
//! Permission checks go through the robotstxt crate; affiliated domains are
//! read from directive values that are absolute URLs.

use crate::url::origin_of;
use robotstxt::DefaultMatcher;

/// Directives whose values may point at other domains of the same site
const DOMAIN_DIRECTIVES: &[&str] = &["allow", "disallow", "sitemap"];

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content
    content: String,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }

    /// Checks if a URL may be fetched by the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL to check
    /// * `user_agent` - The user agent string
    pub fn can_fetch(&self, url: &str, user_agent: &str) -> bool {
        if self.content.trim().is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Origins (`scheme://netloc`) named by `Allow`, `Disallow`, and `Sitemap` values
    ///
    /// Relative values such as `/admin` are ignored. Order follows the file;
    /// duplicates are kept for the caller to collapse.
    pub fn affiliated_origins(&self) -> Vec<String> {
        let mut origins = Vec::new();

        for line in self.content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once(':') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            if !DOMAIN_DIRECTIVES.contains(&key.as_str()) {
                continue;
            }

            // Drop trailing comments
            let value = value.split('#').next().unwrap_or_default().trim();
            if let Some(origin) = origin_of(value) {
                origins.push(origin);
            }
        }

        origins
    }
}
