//! Outreach email composition
//!
//! The composer turns accepted issues into an email with one of several
//! interchangeable intros and calls-to-action. Phrase choice goes through a
//! [`PhraseSelector`] so tests can pin it with a seed.

use crate::report::IssueRecord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const INTROS: [&str; 3] = [
    "After a quick look at a few pages from {domain}, one of our reviewers noticed some language details that could be improved.",
    "One of our expert linguists reviewed parts of {domain} and found a few small things that could hurt clarity or brand perception.",
    "We had one of our senior linguists look over content from {domain}, and they found some phrasing issues that are easy to fix.",
];

const CALLS_TO_ACTION: [&str; 3] = [
    "Would you be open to a quick 15-minute call to go through a more in-depth review?",
    "We'd be happy to run a full audit if you'd like. Let us know if we should schedule a time.",
    "Let us know if you'd like us to prepare a detailed quote or deeper linguistic report.",
];

/// Chooses one of several phrase variants
pub trait PhraseSelector {
    /// Returns an index in `0..variants`
    fn choose(&mut self, variants: usize) -> usize;
}

/// [`PhraseSelector`] backed by a standard RNG
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Reproducible selector for tests and repeatable runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Selector seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl PhraseSelector for RandomSelector {
    fn choose(&mut self, variants: usize) -> usize {
        if variants <= 1 {
            return 0;
        }
        self.rng.random_range(0..variants)
    }
}

/// Email sent when the sample turned up nothing
pub fn no_issues_message(domain: &str) -> String {
    format!(
        "After a brief review of {}, we didn't find any obvious linguistic mistakes. If you'd like us to look deeper or provide guidance, we'd be happy to assist.",
        domain
    )
}

/// Extrapolated error count for the whole site, `None` without a sample
pub fn estimate_total_errors(
    total_errors: usize,
    pages_used: usize,
    estimated_total_pages: u64,
) -> Option<u64> {
    if pages_used == 0 {
        return None;
    }
    let rate = total_errors as f64 / pages_used as f64;
    Some((rate * estimated_total_pages as f64).round() as u64)
}

/// Builds outreach emails from collected issues
pub struct ReportComposer<S: PhraseSelector> {
    selector: S,
}

impl<S: PhraseSelector> ReportComposer<S> {
    pub fn new(selector: S) -> Self {
        Self { selector }
    }

    /// Composes the email for one domain
    ///
    /// # Arguments
    ///
    /// * `domain` - Domain name shown to the reader
    /// * `issues` - Accepted issues, in collection order
    /// * `total_errors` - Number of accepted issues
    /// * `pages_used` - Number of pages that produced an accepted issue
    /// * `estimated_total_pages` - Assumed site size for the extrapolation
    ///
    /// # Returns
    ///
    /// The email body; the fixed fallback when `issues` is empty
    pub fn compose(
        &mut self,
        domain: &str,
        issues: &[IssueRecord],
        total_errors: usize,
        pages_used: usize,
        estimated_total_pages: u64,
    ) -> String {
        if issues.is_empty() {
            return no_issues_message(domain);
        }

        let intro_idx = self.selector.choose(INTROS.len()) % INTROS.len();
        let cta_idx = self.selector.choose(CALLS_TO_ACTION.len()) % CALLS_TO_ACTION.len();
        let intro = INTROS[intro_idx].replace("{domain}", domain);
        let cta = CALLS_TO_ACTION[cta_idx];

        // The extrapolation is reported alongside the email, not inside it
        let estimate = estimate_total_errors(total_errors, pages_used, estimated_total_pages);
        tracing::debug!(
            "Estimated site-wide issues for {}: {}",
            domain,
            estimate.map_or_else(|| "?".to_string(), |n| n.to_string())
        );

        let examples = issues
            .iter()
            .map(IssueRecord::render)
            .collect::<Vec<_>>()
            .join("\n\n");

        let outro = format!(
            "{} issues across just {} pages suggests there might be significant inconsistencies throughout the site.\n\n{}",
            total_errors, pages_used, cta
        );

        format!("{}\n\nHere are a few examples:\n\n{}\n\n{}", intro, examples, outro)
    }
}
