//! Markdown report generation
//!
//! This module writes one human-readable markdown file per analyzed domain,
//! containing the sample statistics, the composed email, and every issue.

use crate::report::Report;
use chrono::Utc;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing reports
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes a markdown report for one domain into `dir`
///
/// The directory is created when missing. The file is named after the
/// domain's netloc, e.g. `example.com.md`.
///
/// # Arguments
///
/// * `report` - The finished analysis
/// * `dir` - Output directory
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - Failed to write the report
pub fn write_markdown_report(report: &Report, dir: &Path) -> OutputResult<PathBuf> {
    if dir.exists() && !dir.is_dir() {
        return Err(OutputError::Write(format!("{} is not a directory", dir.display())));
    }
    fs::create_dir_all(dir)?;

    let path = dir.join(report_file_name(report));
    let markdown = format_markdown_report(report);

    let mut file = File::create(&path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(path)
}

/// File name used for a report, safe on every platform
pub fn report_file_name(report: &Report) -> String {
    let stem: String = report
        .domain
        .netloc()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.md", stem)
}

/// Formats a report as markdown
pub fn format_markdown_report(report: &Report) -> String {
    let mut md = String::new();

    // Title
    md.push_str(&format!("# Linguistic Review: {}\n\n", report.domain.netloc()));

    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Domain**: {}\n", report.domain));
    md.push_str(&format!(
        "- **Generated**: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Statistics\n\n");
    md.push_str(&format!("- **Candidate Pages**: {}\n", report.candidates));
    md.push_str(&format!("- **Issues Found**: {}\n", report.total_errors));
    md.push_str(&format!("- **Pages Used**: {}\n", report.pages_used));
    md.push_str(&format!(
        "- **Estimated Site-Wide Issues**: {}\n\n",
        report
            .estimated_total_errors
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string())
    ));

    md.push_str("## Email\n\n");
    md.push_str("```text\n");
    md.push_str(&report.email);
    md.push_str("\n```\n\n");

    if !report.issues.is_empty() {
        md.push_str("## Issues\n\n");
        for (i, issue) in report.issues.iter().enumerate() {
            md.push_str(&format!("### Issue {}\n\n", i + 1));
            md.push_str(&format!("- **URL**: {}\n", issue.url));
            md.push_str(&format!("- **Language**: {}\n", issue.language.to_uppercase()));
            md.push_str(&format!("- **Original sentence**: {}\n", issue.original_sentence));
            if let Some(explanation) = &issue.explanation {
                md.push_str(&format!("- **Issue**: {}\n", explanation));
            }
            if let Some(correction) = &issue.suggested_correction {
                md.push_str(&format!("- **Suggested correction**: {}\n", correction));
            }
            md.push('\n');
        }
    }

    md
}
