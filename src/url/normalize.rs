use url::Url;

/// Strips a leading `www.` label from a host or netloc
///
/// # Examples
///
/// ```
/// use lingo_sweep::url::strip_www;
///
/// assert_eq!(strip_www("www.example.com"), "example.com");
/// assert_eq!(strip_www("blog.example.com"), "blog.example.com");
/// ```
pub fn strip_www(netloc: &str) -> &str {
    netloc.strip_prefix("www.").unwrap_or(netloc)
}

/// Returns the `host[:port]` part of a URL, lowercased
///
/// Default ports are omitted, matching how browsers display origins.
pub fn netloc_of(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Returns the `scheme://netloc` origin of an absolute URL string
///
/// Only http and https URLs have an origin here; anything else yields `None`.
///
/// # Examples
///
/// ```
/// use lingo_sweep::url::origin_of;
///
/// assert_eq!(
///     origin_of("https://shop.example.com/sitemap.xml"),
///     Some("https://shop.example.com".to_string())
/// );
/// assert_eq!(origin_of("/relative/path"), None);
/// ```
pub fn origin_of(url_str: &str) -> Option<String> {
    let url = Url::parse(url_str.trim()).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    let netloc = netloc_of(&url)?;
    Some(format!("{}://{}", url.scheme(), netloc))
}

/// Cleans a user-typed domain or URL
///
/// Surrounding whitespace and trailing slashes are removed. An explicit scheme
/// of any kind is kept, so that non-http(s) input fails to parse as a domain;
/// bare domains get `https://`.
pub fn clean_domain_input(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// True for `scheme://...` and `scheme:...` input, but not `host:port`
fn has_scheme(input: &str) -> bool {
    if input.contains("://") {
        return true;
    }
    let Some((prefix, rest)) = input.split_once(':') else {
        return false;
    };
    let valid_scheme = prefix
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid_scheme && !rest.starts_with(|c: char| c.is_ascii_digit())
}
