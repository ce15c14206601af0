//! Report types, email composition, and markdown output
//!
//! This module handles:
//! - Parsing extractor responses into issue records
//! - Composing the outreach email
//! - Writing per-domain markdown reports

mod composer;
mod issue;
mod markdown;

pub use composer::{
    estimate_total_errors, no_issues_message, PhraseSelector, RandomSelector, ReportComposer,
};
pub use issue::{dedup_key_of, IssueRecord, ORIGINAL_SENTENCE_MARKER};
pub use markdown::{
    format_markdown_report, report_file_name, write_markdown_report, OutputError, OutputResult,
};

use crate::url::Domain;

/// Result of analyzing one domain
#[derive(Debug, Clone)]
pub struct Report {
    /// The analyzed root domain
    pub domain: Domain,

    /// Composed outreach email
    pub email: String,

    /// Accepted issues, in collection order
    pub issues: Vec<IssueRecord>,

    /// Number of accepted issues
    pub total_errors: usize,

    /// Number of pages that produced an accepted issue
    pub pages_used: usize,

    /// Number of candidate URLs discovered
    pub candidates: usize,

    /// Extrapolated site-wide issue count, `None` when no page was used
    pub estimated_total_errors: Option<u64>,
}

impl Report {
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}
