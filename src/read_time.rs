//! Markdown read-time estimation
//!
//! Strips markdown structure so only prose is counted, then converts the word
//! count into a "`n` min read" label at 225 words per minute.

use std::sync::LazyLock;

use regex::Regex;

/// Average adult reading speed used for estimates
pub const WORDS_PER_MINUTE: usize = 225;

/// Shortest estimate ever reported
const MIN_MINUTES: usize = 1;

/// Ordered stripping rules: each pattern is replaced with its paired template.
///
/// Images run before links so `![alt](src)` disappears entirely instead of
/// leaving its alt text behind. Line-anchored rules use CRLF mode so `\r\n`
/// endings behave like `\n`.
static STRIP_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Fenced code blocks
        (r"(?s)```.*?```", ""),
        // Inline code
        (r"`[^`]*`", ""),
        // Images
        (r"!\[[^\]]*\]\([^)]+\)", ""),
        // Links keep their text
        (r"\[([^\]]+)\]\([^)]+\)", "$1"),
        // Headings
        (r"(?mR)^#{1,6}\s+", ""),
        // Bold
        (r"\*\*(.*?)\*\*", "$1"),
        (r"__(.*?)__", "$1"),
        // Italic
        (r"\*(.*?)\*", "$1"),
        (r"_(.*?)_", "$1"),
        // Raw markup tags
        (r"<[^>]*>", ""),
        // Horizontal rules
        (r"(?mR)^(?:-{3,}|_{3,}|\*{3,})$", ""),
        // Blockquotes
        (r"(?mR)^>\s+", ""),
        // Bulleted and numbered list markers
        (r"(?mR)^\s*[-*+]\s+", ""),
        (r"(?mR)^\s*\d+\.\s+", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        // Patterns are literals; a failure here is a programming error caught by tests.
        let regex = Regex::new(pattern).unwrap_or_else(|e| panic!("invalid pattern {pattern}: {e}"));
        (regex, replacement)
    })
    .collect()
});

/// Removes markdown syntax, leaving the visible prose.
pub fn strip_markdown(content: &str) -> String {
    STRIP_RULES
        .iter()
        .fold(content.to_string(), |text, (regex, replacement)| {
            regex.replace_all(&text, *replacement).into_owned()
        })
}

/// Counts whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `words` words, rounded up and never below one.
pub fn minutes_for(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE).max(MIN_MINUTES)
}

/// Estimates how long a markdown document takes to read.
///
/// Always returns a label of the form `"<n> min read"` with `n >= 1`, even
/// for empty input or input with no words left after stripping.
///
/// ```
/// assert_eq!(sitekit::read_time::read_time(""), "1 min read");
/// ```
pub fn read_time(content: &str) -> String {
    if content.trim().is_empty() {
        return format!("{} min read", MIN_MINUTES);
    }

    let words = word_count(&strip_markdown(content));
    format!("{} min read", minutes_for(words))
}
