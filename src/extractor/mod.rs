//! Issue extraction through a language model
//!
//! An extractor receives the text of one page and returns at most one
//! structured issue report, or an empty string when nothing was found or the
//! model could not be reached.

mod openai;
mod prompt;

pub use openai::{ChatRequest, Message, OpenAiExtractor};
pub use prompt::{render_prompt, DEFAULT_PROMPT_TEMPLATE, TEXT_PLACEHOLDER};

use async_trait::async_trait;

/// How picky the extractor should be about minor findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strictness {
    /// Punctuation and spacing findings are rejected
    Strict,
    /// Punctuation and spacing findings are acceptable
    AllowMinor,
}

/// Asks a language model for one linguistic issue in a page
#[async_trait]
pub trait IssueExtractor: Send + Sync {
    /// Returns the structured issue text, or `""` when none was produced
    ///
    /// Implementations must never fail: transport and model errors become an
    /// empty result.
    async fn extract_issue(
        &self,
        text: &str,
        prompt_template: &str,
        strictness: Strictness,
    ) -> String;
}

/// Returns true when a finding is only about punctuation or spacing
pub fn is_minor_issue(response: &str) -> bool {
    let lower = response.to_lowercase();
    lower.contains("punctuation") || lower.contains("extra space")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_issue_detection() {
        assert!(is_minor_issue("- Issue: Missing Punctuation at the end"));
        assert!(is_minor_issue("- Issue: Extra space before the comma"));
        assert!(!is_minor_issue("- Issue: Wrong verb tense"));
    }
}
