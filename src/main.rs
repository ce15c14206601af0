//! Lingo-Sweep main entry point
//!
//! This is the command-line interface for the Lingo-Sweep linguistic sampler.

use anyhow::{bail, Context, Result};
use clap::Parser;
use lingo_sweep::config::{load_config_with_hash, validate_language_code, Config};
use lingo_sweep::report::write_markdown_report;
use lingo_sweep::{Analyzer, Report};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Lingo-Sweep: linguistic QA sampling for outreach
///
/// Lingo-Sweep samples a handful of pages from each website, asks a language
/// model for one linguistic issue per page, and prints an outreach email
/// built from the findings.
#[derive(Parser, Debug)]
#[command(name = "lingo-sweep")]
#[command(version = "1.0.0")]
#[command(about = "Linguistic QA sampling for outreach", long_about = None)]
struct Cli {
    /// Domains or URLs to analyze (e.g. example.com)
    #[arg(value_name = "DOMAINS")]
    domains: Vec<String>,

    /// File with one domain per line
    #[arg(long, value_name = "FILE")]
    sites: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// API key for the chat-completions endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Only analyze pages in these languages (e.g. en,fr)
    #[arg(short, long, value_delimiter = ',')]
    languages: Option<Vec<String>>,

    /// Add domains named in robots.txt to the crawl
    #[arg(long)]
    robots: bool,

    /// Write one markdown report per domain into this directory
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Validate config and show what would be analyzed without any network access
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let domains = collect_domains(&cli)?;
    if domains.is_empty() {
        bail!("No domains given; pass DOMAINS or --sites FILE");
    }

    if cli.dry_run {
        handle_dry_run(&config, &domains);
        return Ok(());
    }

    let api_key = cli.api_key.clone().unwrap_or_default();
    let analyzer = Analyzer::new(config, &api_key).context("Failed to set up the analyzer")?;

    handle_analyze(&analyzer, &domains, cli.output_dir.as_deref()).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("lingo_sweep=info,warn"),
            1 => EnvFilter::new("lingo_sweep=debug,info"),
            2 => EnvFilter::new("lingo_sweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file (or defaults) and applies command-line overrides
fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(languages) = &cli.languages {
        let codes: Vec<String> = languages
            .iter()
            .map(|code| code.trim().to_lowercase())
            .filter(|code| !code.is_empty())
            .collect();
        for code in &codes {
            validate_language_code(code)?;
        }
        config.scope.allowed_languages = if codes.is_empty() { None } else { Some(codes) };
    }
    if cli.robots {
        config.scope.robots_enlargement = true;
    }

    Ok(config)
}

/// Gathers domains from the command line and the optional sites file
fn collect_domains(cli: &Cli) -> Result<Vec<String>> {
    let mut domains: Vec<String> = cli.domains.iter().map(|d| clean_site_input(d)).collect();

    if let Some(path) = &cli.sites {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sites file {}", path.display()))?;
        domains.extend(
            content
                .lines()
                .map(clean_site_input)
                .filter(|line| !line.is_empty()),
        );
    }

    domains.retain(|d| !d.is_empty());
    Ok(domains)
}

/// Strips the scheme and trailing slashes from a site the way users type it
fn clean_site_input(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

/// Handles the --dry-run mode: shows the effective configuration and domains
fn handle_dry_run(config: &Config, domains: &[String]) {
    println!("=== Lingo-Sweep Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Max issues: {}", config.crawler.max_issues);
    println!(
        "  Minimum content length: {} chars",
        config.crawler.min_content_length
    );
    println!("  Pacing delay: {}ms", config.crawler.pacing_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);
    println!(
        "  Estimated total pages: {}",
        config.crawler.estimated_total_pages
    );
    println!("  User agent: {}", config.crawler.user_agent);

    println!("\nScope:");
    match &config.scope.allowed_languages {
        Some(codes) => println!("  Languages: {}", codes.join(", ")),
        None => println!("  Languages: any"),
    }
    println!("  Robots enlargement: {}", config.scope.robots_enlargement);

    println!("\nExtractor:");
    println!("  Model: {}", config.extractor.model);
    println!("  Temperature: {}", config.extractor.temperature);
    println!("  Base URL: {}", config.extractor.base_url);
    println!("  Max input chars: {}", config.extractor.max_input_chars);
    println!(
        "  Prompt template: {}",
        if config.extractor.prompt_template.is_some() {
            "custom"
        } else {
            "built-in"
        }
    );

    println!("\nDomains ({}):", domains.len());
    for domain in domains {
        match lingo_sweep::Domain::parse(domain) {
            Ok(parsed) => println!(
                "  - {}{}",
                parsed,
                if parsed.is_tld_mode() { " (tld mode)" } else { "" }
            ),
            Err(e) => println!("  - {} (invalid: {})", domain, e),
        }
    }

    println!("\n✓ Configuration is valid");
}

/// Analyzes every domain in turn; one failure does not stop the batch
async fn handle_analyze(
    analyzer: &Analyzer,
    domains: &[String],
    output_dir: Option<&Path>,
) -> Result<()> {
    let mut failed = 0usize;

    for domain in domains {
        match analyzer.analyze(domain).await {
            Ok(report) => {
                print_report(&report);
                if let Some(dir) = output_dir {
                    match write_markdown_report(&report, dir) {
                        Ok(path) => tracing::info!("Report written to {}", path.display()),
                        Err(e) => {
                            tracing::error!("Failed to write report for {}: {}", domain, e);
                            failed += 1;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!("Analysis of {} failed: {}", domain, e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} domain(s) failed", failed, domains.len());
    }
    Ok(())
}

fn print_report(report: &Report) {
    println!("=== {} ===\n", report.domain.netloc());
    println!("{}\n", report.email);

    if report.has_issues() {
        println!("Issues found ({}):", report.issues.len());
        for (i, issue) in report.issues.iter().enumerate() {
            println!("\n{}. {}", i + 1, issue.render());
        }
        println!();
    }
}
