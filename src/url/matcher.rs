/// Checks if a URL path belongs to one of the allowed language sections
///
/// A path matches when it is the site root (`/`) or starts with `/<code>` for
/// one of the codes. This is a cheap prefix heuristic, so `/en` also matches
/// `/enterprise`; content-based detection confirms the language afterwards.
///
/// # Examples
///
/// ```
/// use lingo_sweep::url::matches_language_path;
///
/// let codes = vec!["en".to_string(), "fr".to_string()];
/// assert!(matches_language_path("/", &codes));
/// assert!(matches_language_path("/fr/contact", &codes));
/// assert!(!matches_language_path("/de/kontakt", &codes));
/// ```
pub fn matches_language_path(path: &str, codes: &[String]) -> bool {
    if path == "/" {
        return true;
    }
    codes
        .iter()
        .any(|code| path.starts_with(&format!("/{}", code)))
}

/// Path prefixes probed for links: the root plus one `/<code>` per language
///
/// Without a language filter only the root is probed.
pub fn language_prefixes(codes: Option<&[String]>) -> Vec<String> {
    let mut prefixes = vec![String::new()];
    if let Some(codes) = codes {
        prefixes.extend(codes.iter().map(|code| format!("/{}", code)));
    }
    prefixes
}
