//! URL handling module for Lingo-Sweep
//!
//! This module provides the `Domain` identity type, netloc normalization,
//! and the language-path heuristics used to scope discovery.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{canonicalize_domains, Domain};
pub use matcher::{language_prefixes, matches_language_path};
pub use normalize::{clean_domain_input, netloc_of, origin_of, strip_www};
