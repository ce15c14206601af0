//! In-memory collaborators for unit tests

use crate::crawler::parser::html_to_text;
use crate::crawler::PageFetcher;
use crate::extractor::{IssueExtractor, Strictness};
use crate::language::{LanguageDetector, UNKNOWN_LANGUAGE};
use crate::SweepError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves pages and robots.txt from maps keyed by exact URL
#[derive(Default)]
pub struct StubFetcher {
    html: HashMap<String, String>,
    text: HashMap<String, String>,
    robots: HashMap<String, String>,
    raw_requests: Mutex<Vec<String>>,
    text_requests: Mutex<Vec<String>>,
    robots_requests: AtomicUsize,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_html(mut self, url: &str, html: &str) -> Self {
        self.html.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_text(mut self, url: &str, text: &str) -> Self {
        self.text.insert(url.to_string(), text.to_string());
        self
    }

    pub fn with_robots(mut self, url: &str, content: &str) -> Self {
        self.robots.insert(url.to_string(), content.to_string());
        self
    }

    pub fn raw_requests(&self) -> Vec<String> {
        self.raw_requests.lock().unwrap().clone()
    }

    pub fn text_requests(&self) -> Vec<String> {
        self.text_requests.lock().unwrap().clone()
    }

    pub fn robots_requests(&self) -> usize {
        self.robots_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch_raw_html(&self, url: &str) -> Result<String, SweepError> {
        self.raw_requests.lock().unwrap().push(url.to_string());
        self.html.get(url).cloned().ok_or_else(|| SweepError::HttpStatus {
            url: url.to_string(),
            status: 404,
        })
    }

    async fn fetch_page_text(&self, url: &str) -> String {
        self.text_requests.lock().unwrap().push(url.to_string());
        if let Some(text) = self.text.get(url) {
            return text.clone();
        }
        self.html.get(url).map(|html| html_to_text(html)).unwrap_or_default()
    }

    async fn fetch_robots_txt(&self, url: &str) -> Option<String> {
        self.robots_requests.fetch_add(1, Ordering::SeqCst);
        self.robots.get(url).cloned()
    }
}

/// Reads the language from a `lang=xx` tag embedded in the text
pub struct TagDetector;

impl LanguageDetector for TagDetector {
    fn detect(&self, text: &str) -> String {
        text.find("lang=")
            .and_then(|idx| text.get(idx + 5..idx + 7))
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string())
    }
}

type Responder = Box<dyn Fn(&str, Strictness) -> String + Send + Sync>;

/// Answers extraction requests with a closure and records every call
pub struct StubExtractor {
    responder: Responder,
    calls: Mutex<Vec<Strictness>>,
}

impl StubExtractor {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str, Strictness) -> String + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Strictness> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueExtractor for StubExtractor {
    async fn extract_issue(
        &self,
        text: &str,
        _prompt_template: &str,
        strictness: Strictness,
    ) -> String {
        self.calls.lock().unwrap().push(strictness);
        (self.responder)(text, strictness)
    }
}

/// Builds a well-formed extractor response
pub fn issue_response(sentence: &str) -> String {
    format!(
        "- Original sentence: \"{}\"\n- Issue: Subject-verb agreement\n- Suggested correction: \"{} (fixed)\"",
        sentence, sentence
    )
}

/// Page text long enough to pass the content-length check
pub fn long_text(lang: &str, marker: &str) -> String {
    format!("lang={} {} {}", lang, marker, "lorem ipsum dolor sit amet ".repeat(25))
}
