//! Integration tests for domain analysis
//!
//! These tests use wiremock to stand in for both the analyzed website and the
//! chat-completions API, and run the full pipeline end-to-end.

use lingo_sweep::config::Config;
use lingo_sweep::report::{no_issues_message, write_markdown_report};
use lingo_sweep::{Analyzer, SweepError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENGLISH_PARAGRAPH: &str = "Our company have been helping small businesses grow since many years. \
We provides accounting, payroll and tax services for clients across the region, and our team of \
advisors work closely with every customer to understand their needs. Whether you are just starting \
out or already running an established business, we can help you keep your finances in order so \
that you can focus on what you do best. Contact us today to book a free consultation with one of \
our friendly advisors and find out how we can make your life easier. We look forward to hearing \
from you and working together on the next chapter of your story.";

/// Creates a test configuration pointing the extractor at `api_server`
fn create_test_config(api_server: &MockServer) -> Config {
    let mut config = Config::default();
    config.crawler.pacing_delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config.extractor.base_url = format!("{}/v1", api_server.uri());
    config
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>Page</title><script>var x = 1;</script></head><body>{}</body></html>",
            body
        ))
        .insert_header("content-type", "text/html")
}

fn chat_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

async fn mount_site(site: &MockServer, pages: &[(&str, &str)]) {
    let links: String = pages
        .iter()
        .map(|(p, _)| format!("<a href=\"{}\">link</a>\n", p))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(&format!(
            "{}<a href=\"/logo.png\">logo</a><a href=\"mailto:hi@example.com\">mail</a>",
            links
        )))
        .mount(site)
        .await;

    for (page_path, body) in pages {
        Mock::given(method("GET"))
            .and(path(*page_path))
            .respond_with(html_page(&format!("<p>{}</p>", body)))
            .mount(site)
            .await;
    }
}

#[tokio::test]
async fn test_single_page_with_grammar_error() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    mount_site(&site, &[("/about", ENGLISH_PARAGRAPH)]).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_response(
            "- Original sentence: \"Our company have been helping small businesses grow since many years.\"\n\
             - Issue: Subject-verb agreement and wrong preposition\n\
             - Suggested correction: \"Our company has been helping small businesses grow for many years.\"",
        ))
        .mount(&api)
        .await;

    let analyzer = Analyzer::new(create_test_config(&api), "sk-test")
        .expect("Failed to build analyzer")
        .with_phrase_seed(7);
    let report = analyzer.analyze(&site.uri()).await.expect("Analysis failed");

    assert_eq!(report.candidates, 1);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.total_errors, 1);
    assert_eq!(report.pages_used, 1);

    let issue = &report.issues[0];
    assert_eq!(issue.url, format!("{}/about", site.uri()));
    assert_eq!(
        issue.suggested_correction.as_deref(),
        Some("Our company has been helping small businesses grow for many years.")
    );

    assert!(report.email.contains("Here are a few examples:"));
    assert_eq!(report.email.matches("Original sentence:").count(), 1);
    assert!(report.email.contains(&format!("URL: {}/about", site.uri())));
    assert!(report.email.contains("1 issues across just 1 pages"));
}

#[tokio::test]
async fn test_short_pages_produce_fallback_email() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    mount_site(
        &site,
        &[("/a", "Short page."), ("/b", "Another short page."), ("/c", "Tiny.")],
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_response("- Original sentence: \"x\""))
        .expect(0)
        .mount(&api)
        .await;

    let analyzer =
        Analyzer::new(create_test_config(&api), "sk-test").expect("Failed to build analyzer");
    let report = analyzer.analyze(&site.uri()).await.expect("Analysis failed");

    assert_eq!(report.candidates, 3);
    assert!(report.issues.is_empty());
    assert_eq!(report.email, no_issues_message(report.domain.netloc()));
}

#[tokio::test]
async fn test_repeated_sentence_is_reported_once() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    let pages: Vec<(String, &str)> = (0..10)
        .map(|i| (format!("/page-{}", i), ENGLISH_PARAGRAPH))
        .collect();
    let page_refs: Vec<(&str, &str)> = pages.iter().map(|(p, b)| (p.as_str(), *b)).collect();
    mount_site(&site, &page_refs).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_response(
            "- Original sentence: \"We provides accounting\"\n- Issue: Agreement\n- Suggested correction: \"We provide accounting\"",
        ))
        .mount(&api)
        .await;

    let analyzer =
        Analyzer::new(create_test_config(&api), "sk-test").expect("Failed to build analyzer");
    let report = analyzer.analyze(&site.uri()).await.expect("Analysis failed");

    assert_eq!(report.candidates, 10);
    assert_eq!(report.issues.len(), 1);
    assert_eq!(report.issues[0].url, format!("{}/page-0", site.uri()));
}

#[tokio::test]
async fn test_unreachable_robots_falls_back_to_root() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    mount_site(&site, &[("/about", ENGLISH_PARAGRAPH)]).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&site)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_response(""))
        .mount(&api)
        .await;

    let mut config = create_test_config(&api);
    config.scope.robots_enlargement = true;
    let analyzer = Analyzer::new(config, "sk-test").expect("Failed to build analyzer");
    let report = analyzer.analyze(&site.uri()).await.expect("Analysis failed");

    assert_eq!(report.candidates, 1);
    assert!(report.issues.is_empty());
}

#[tokio::test]
async fn test_robots_enlargement_adds_affiliated_domain() {
    let site = MockServer::start().await;
    let sister = MockServer::start().await;
    let api = MockServer::start().await;
    mount_site(&site, &[("/about", ENGLISH_PARAGRAPH)]).await;
    mount_site(&sister, &[("/a-propos", ENGLISH_PARAGRAPH)]).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            "User-agent: *\nDisallow: /admin\nSitemap: {}/sitemap.xml\n",
            sister.uri()
        )))
        .mount(&site)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_response(""))
        .mount(&api)
        .await;

    let mut config = create_test_config(&api);
    config.scope.robots_enlargement = true;
    let analyzer = Analyzer::new(config, "sk-test").expect("Failed to build analyzer");
    let report = analyzer.analyze(&site.uri()).await.expect("Analysis failed");

    assert_eq!(report.candidates, 2);
}

#[tokio::test]
async fn test_extractor_failure_is_absorbed() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    mount_site(&site, &[("/about", ENGLISH_PARAGRAPH)]).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream error"))
        .mount(&api)
        .await;

    let analyzer =
        Analyzer::new(create_test_config(&api), "sk-test").expect("Failed to build analyzer");
    let report = analyzer.analyze(&site.uri()).await.expect("Analysis failed");

    assert!(report.issues.is_empty());
    assert!(report.email.starts_with("After a brief review of"));
}

#[tokio::test]
async fn test_missing_api_key_is_fatal() {
    let api = MockServer::start().await;
    let result = Analyzer::new(create_test_config(&api), "   ");
    assert!(matches!(result, Err(SweepError::MissingApiKey)));
}

#[tokio::test]
async fn test_markdown_report_written() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;
    mount_site(&site, &[("/about", ENGLISH_PARAGRAPH)]).await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(chat_response(
            "- Original sentence: \"We provides accounting\"\n- Issue: Agreement\n- Suggested correction: \"We provide accounting\"",
        ))
        .mount(&api)
        .await;

    let analyzer =
        Analyzer::new(create_test_config(&api), "sk-test").expect("Failed to build analyzer");
    let report = analyzer.analyze(&site.uri()).await.expect("Analysis failed");

    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let written = write_markdown_report(&report, temp_dir.path()).expect("Failed to write report");

    let content = std::fs::read_to_string(&written).expect("Failed to read report");
    assert!(content.contains("### Issue 1"));
    assert!(content.contains("We provide accounting"));
}
