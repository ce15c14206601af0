use crate::extractor::Strictness;

/// Placeholder replaced by the page text in prompt templates
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Built-in translation QA prompt
pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"You are reviewing website copy as a senior translation QA specialist. Find exactly 1 example of a linguistic issue in the content below. Only report clear, verifiable errors that a native speaker or professional reviewer would flag.

Report only issues from these categories:
- Mistranslations
- Awkward phrasing
- Unnatural expressions
- Grammar issues
- Incorrect word choice

Do not report:
- Punctuation-only problems (missing quotes, commas, periods)
- Extra spaces
- Truncated or incomplete phrases, unless they are clearly wrong in full context

Use this response format:
- Original sentence: "..."
- Issue: [Short explanation]
- Suggested correction: "..."

If you find no issue, return an empty string.

Text:
{text}"#;

const ALLOW_MINOR_NOTE: &str =
    "\n\nIf no better error exists in the text, a punctuation or spacing issue is acceptable.";

/// Fills a prompt template with page text
///
/// The text is truncated to `max_chars` characters. In
/// [`Strictness::AllowMinor`] mode a note permitting punctuation and spacing
/// findings is appended.
///
/// # Example
///
/// ```
/// use lingo_sweep::extractor::{render_prompt, Strictness};
///
/// let prompt = render_prompt("Check: {text}", "abcdef", 3, Strictness::Strict);
/// assert_eq!(prompt, "Check: abc");
/// ```
pub fn render_prompt(
    template: &str,
    text: &str,
    max_chars: usize,
    strictness: Strictness,
) -> String {
    let truncated: String = text.chars().take(max_chars).collect();
    let mut prompt = template.replace(TEXT_PLACEHOLDER, &truncated);
    if strictness == Strictness::AllowMinor {
        prompt.push_str(ALLOW_MINOR_NOTE);
    }
    prompt
}
