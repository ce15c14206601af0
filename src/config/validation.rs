use crate::config::types::{Config, CrawlerConfig, ExtractorConfig, ScopeConfig};
use crate::extractor::TEXT_PLACEHOLDER;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_scope_config(&config.scope)?;
    validate_extractor_config(&config.extractor)?;
    Ok(())
}

/// Validates crawl budgets and request settings
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_issues < 1 {
        return Err(ConfigError::Validation(format!(
            "max_issues must be >= 1, got {}",
            config.max_issues
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the language allow-set
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    if let Some(languages) = &config.allowed_languages {
        for code in languages {
            validate_language_code(code)?;
        }
    }
    Ok(())
}

/// Validates the language-model settings
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "temperature must be between 0 and 2, got {}",
            config.temperature
        )));
    }

    let base_url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;
    if base_url.scheme() != "http" && base_url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            config.base_url
        )));
    }

    if config.max_input_chars < 1 {
        return Err(ConfigError::Validation(
            "max_input_chars must be >= 1".to_string(),
        ));
    }

    if let Some(template) = &config.prompt_template {
        if !template.contains(TEXT_PLACEHOLDER) {
            return Err(ConfigError::Validation(format!(
                "prompt_template must contain the {} placeholder",
                TEXT_PLACEHOLDER
            )));
        }
    }

    Ok(())
}

/// Validates a short language code such as "en" or "fr"
pub fn validate_language_code(code: &str) -> Result<(), ConfigError> {
    let valid = (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_lowercase());
    if !valid {
        return Err(ConfigError::InvalidLanguage(format!(
            "'{}' must be 2-3 lowercase ASCII letters",
            code
        )));
    }
    Ok(())
}
