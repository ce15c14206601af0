//! Structured issue records parsed from extractor responses

/// Marker line every well-formed extractor response carries
pub const ORIGINAL_SENTENCE_MARKER: &str = "Original sentence:";

const ISSUE_MARKER: &str = "Issue:";
const CORRECTION_MARKER: &str = "Suggested correction:";

/// One accepted linguistic issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    /// Raw structured text as returned by the extractor
    pub text: String,

    /// The sentence the issue was found in
    pub original_sentence: String,

    /// Short explanation of the problem
    pub explanation: Option<String>,

    /// Proposed fix
    pub suggested_correction: Option<String>,

    /// Page the issue was found on
    pub url: String,

    /// Detected language of the page
    pub language: String,
}

impl IssueRecord {
    /// Parses an extractor response
    ///
    /// Returns `None` when the response has no `Original sentence:` line.
    ///
    /// # Example
    ///
    /// ```
    /// use lingo_sweep::IssueRecord;
    ///
    /// let response = "- Original sentence: \"We is open\"\n- Issue: Agreement\n- Suggested correction: \"We are open\"";
    /// let record = IssueRecord::from_response(response, "https://example.com/", "en").unwrap();
    /// assert_eq!(record.original_sentence, "We is open");
    /// assert_eq!(record.suggested_correction.as_deref(), Some("We are open"));
    /// ```
    pub fn from_response(response: &str, url: &str, language: &str) -> Option<Self> {
        let text = response.trim();
        let original_sentence = field_value(text, ORIGINAL_SENTENCE_MARKER)?;

        Some(Self {
            text: text.to_string(),
            original_sentence,
            explanation: field_value(text, ISSUE_MARKER),
            suggested_correction: field_value(text, CORRECTION_MARKER),
            url: url.to_string(),
            language: language.to_string(),
        })
    }

    /// Deduplication key: the trimmed line carrying the original sentence
    pub fn dedup_key(&self) -> &str {
        dedup_key_of(&self.text).unwrap_or(&self.text)
    }

    /// Renders the issue block used in the outreach email
    pub fn render(&self) -> String {
        format!(
            "{}\nURL: {}\nLanguage: {}",
            self.text,
            self.url,
            self.language.to_uppercase()
        )
    }
}

/// Returns the trimmed `Original sentence:` line of a response, if any
pub fn dedup_key_of(response: &str) -> Option<&str> {
    let marker = ORIGINAL_SENTENCE_MARKER.to_lowercase();
    response
        .lines()
        .map(str::trim)
        .find(|line| line.to_lowercase().contains(&marker))
}

fn field_value(text: &str, marker: &str) -> Option<String> {
    let marker_lower = marker.to_lowercase();
    text.lines().find_map(|line| {
        let idx = match line.find(marker) {
            Some(idx) => idx,
            // Lowercasing can shift byte offsets for non-ASCII text
            None if line.is_ascii() => line.to_lowercase().find(&marker_lower)?,
            None => return None,
        };
        let rest = line.get(idx + marker.len()..)?;
        Some(strip_quotes(rest.trim()).to_string())
    })
}

fn strip_quotes(value: &str) -> &str {
    let quotes: &[char] = &['"', '“', '”', '«', '»'];
    value.trim_matches(quotes).trim()
}
