use crate::url::normalize::{clean_domain_input, netloc_of, strip_www};
use crate::{UrlError, UrlResult};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// A root website identity: `scheme://netloc`
///
/// Path, query, and fragment are never part of a domain. The host is lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain {
    scheme: String,
    netloc: String,
}

impl Domain {
    /// Parses user input such as `example.com` or `https://www.example.com/fr/`
    ///
    /// # Examples
    ///
    /// ```
    /// use lingo_sweep::url::Domain;
    ///
    /// let domain = Domain::parse("Example.com/").unwrap();
    /// assert_eq!(domain.to_string(), "https://example.com");
    ///
    /// let domain = Domain::parse("http://www.example.fr/fr/page").unwrap();
    /// assert_eq!(domain.to_string(), "http://www.example.fr");
    /// ```
    pub fn parse(input: &str) -> UrlResult<Self> {
        let cleaned = clean_domain_input(input);
        let url = Url::parse(&cleaned).map_err(|e| UrlError::Parse(e.to_string()))?;
        Self::from_url(&url)
    }

    /// Extracts the domain of an absolute http(s) URL
    pub fn from_url(url: &Url) -> UrlResult<Self> {
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(UrlError::InvalidScheme(format!(
                "Only HTTP and HTTPS schemes are supported, got: {}",
                url.scheme()
            )));
        }
        let netloc = netloc_of(url).ok_or(UrlError::MissingDomain)?;
        Ok(Self {
            scheme: url.scheme().to_string(),
            netloc,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The `host[:port]` part
    pub fn netloc(&self) -> &str {
        &self.netloc
    }

    /// The netloc with any leading `www.` removed
    pub fn bare_netloc(&self) -> &str {
        strip_www(&self.netloc)
    }

    pub fn is_www(&self) -> bool {
        self.netloc.starts_with("www.")
    }

    /// Host without the port
    pub fn host(&self) -> &str {
        // IPv6 hosts are bracketed, so the last ':' outside brackets is the port
        match self.netloc.rfind(':') {
            Some(idx) if !self.netloc[idx..].contains(']') => &self.netloc[..idx],
            _ => &self.netloc,
        }
    }

    /// True when the top-level suffix is not `.com`
    ///
    /// Such sites are assumed single-language, so language-path filtering is
    /// skipped for them.
    pub fn is_tld_mode(&self) -> bool {
        let tld = self.host().rsplit('.').next().unwrap_or_default();
        tld != "com"
    }

    /// Appends a path (which should start with `/`, or be empty) to the domain
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self, path)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.netloc)
    }
}

/// Collapses `www.` and bare variants into one domain per site
///
/// Domains are grouped by netloc with `www.` stripped. When a group holds both
/// forms, the bare form wins; otherwise the first-seen domain of the group is
/// kept. The root's group comes first, the others follow in sorted order.
pub fn canonicalize_domains<I>(root: &Domain, candidates: I) -> Vec<Domain>
where
    I: IntoIterator<Item = Domain>,
{
    let mut groups: BTreeMap<String, Domain> = BTreeMap::new();

    for domain in std::iter::once(root.clone()).chain(candidates) {
        let key = domain.bare_netloc().to_string();
        match groups.get(&key) {
            Some(existing) if existing.is_www() && !domain.is_www() => {
                groups.insert(key, domain);
            }
            Some(_) => {}
            None => {
                groups.insert(key, domain);
            }
        }
    }

    let root_key = root.bare_netloc().to_string();
    let mut ordered = Vec::with_capacity(groups.len());
    if let Some(root_domain) = groups.remove(&root_key) {
        ordered.push(root_domain);
    }
    ordered.extend(groups.into_values());
    ordered
}
