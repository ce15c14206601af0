//! HTML parser for link discovery and text extraction
//!
//! Link discovery needs the raw `href` values (relative or absolute, exactly as
//! written), while extraction needs the visible text of the page.

use scraper::{Html, Node, Selector};

/// Elements whose text is never page content
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript"];

/// Extracts every `<a href>` value from an HTML document
///
/// Values are trimmed but otherwise returned as written; resolution and
/// filtering are the caller's job.
///
/// # Example
///
/// ```
/// use lingo_sweep::crawler::extract_hrefs;
///
/// let html = r#"<a href="/about">About</a><a href="https://example.com/fr">FR</a>"#;
/// assert_eq!(extract_hrefs(html), vec!["/about", "https://example.com/fr"]);
/// ```
pub fn extract_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect()
}

/// Flattens an HTML document to plain text
///
/// Text inside script, style, and noscript elements is dropped. Text nodes are
/// joined with single spaces and whitespace runs are collapsed.
///
/// # Example
///
/// ```
/// use lingo_sweep::crawler::html_to_text;
///
/// let html = "<html><head><style>p{}</style></head><body><p>Hello</p>\n<p>world</p></body></html>";
/// assert_eq!(html_to_text(html), "Hello world");
/// ```
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut words: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NON_CONTENT_TAGS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        words.extend(text.split_whitespace());
    }

    words.join(" ")
}
