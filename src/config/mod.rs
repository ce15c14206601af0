//! Configuration module for Lingo-Sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional; an empty file yields the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use lingo_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("lingo-sweep.toml")).unwrap();
//! println!("Issue cap: {}", config.crawler.max_issues);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlScope, CrawlerConfig, ExtractorConfig, ScopeConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_language_code};
