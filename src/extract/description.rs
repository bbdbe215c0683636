use super::{all_texts, first_valid};
use scraper::Html;

/// Stored descriptions never exceed this many characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

const ELLIPSIS: &str = "...";
const KEPT_CHARS: usize = MAX_DESCRIPTION_CHARS - 3;

/// Site description blocks, most specific first
const DESCRIPTION_SELECTORS: &[&str] = &[
    ".detail-cont .detail-text",
    ".cont-wrap .text-area",
    ".view-cont .summary",
    "div.cont-area .desc",
];

/// Paragraph scan inside the main content region when the chain fails
const PARAGRAPH_SELECTORS: &[&str] = &["#content p", "main p", ".container p"];

const MIN_CHAIN_CHARS: usize = 50;
const MIN_PARAGRAPH_CHARS: usize = 100;

/// Pull a description out of a rendered detail page.
///
/// Chain candidates must be longer than 50 characters; the paragraph scan
/// accepts the first paragraph longer than 100. When nothing matches, the
/// caller-supplied default (usually the listing's short description) is
/// returned unchanged.
pub fn extract_description(doc: &Html, default_description: &str) -> String {
    if let Some(text) = first_valid(doc, DESCRIPTION_SELECTORS, |t| {
        t.chars().count() > MIN_CHAIN_CHARS
    }) {
        return truncate_description(&text);
    }

    for selector in PARAGRAPH_SELECTORS {
        for text in all_texts(doc, selector) {
            if text.chars().count() > MIN_PARAGRAPH_CHARS {
                return truncate_description(&text);
            }
        }
    }

    default_description.to_string()
}

/// Cap a description at 500 characters, keeping 497 plus the ellipsis
/// marker. Texts already within the cap come back unchanged, so applying
/// this twice is a no-op.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(KEPT_CHARS).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_description() {
        let long = "가".repeat(520);
        let truncated = truncate_description(&long);
        assert_eq!(truncated.chars().count(), 500);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let long = "x".repeat(1000);
        let once = truncate_description(&long);
        let twice = truncate_description(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_short_description_unchanged() {
        let short = "경복궁은 조선 왕조의 법궁이다.";
        assert_eq!(truncate_description(short), short);
    }
}
