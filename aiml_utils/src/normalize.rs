use regex::Regex;
use std::sync::LazyLock;

/// The punctuation characters stripped from patterns and inputs before
/// matching. Only this ASCII set is removed; everything else passes through.
pub const PUNCTUATION: &str = "\"`~!@#$%^&*()-_=+[{]}\\|;:',<.>/?";

pub static PUNCTUATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("[{}]", regex::escape(PUNCTUATION))).unwrap());
pub static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Normalize `text` for pattern matching: uppercase (simple Unicode case
/// folding), replace punctuation with spaces, collapse whitespace runs to a
/// single space, and trim.
///
/// Applied to pattern, that, and topic strings before every insertion and
/// match. Never applied to template output text.
pub fn normalize(text: &str) -> String {
    let text = text.to_uppercase();
    let text = PUNCTUATION_REGEX.replace_all(&text, " ");
    WHITESPACE_REGEX.replace_all(&text, " ").trim().to_string()
}

/// Collapse every whitespace run in `text` to a single space.
///
/// Leading and trailing runs become single spaces rather than being removed;
/// template text leaves rely on this to keep word boundaries intact when
/// fragments are concatenated.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").to_string()
}
