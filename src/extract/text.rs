use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

static SPACE_BEFORE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([.,!?;:])").expect("punctuation regex is valid"));

/// Collapse whitespace runs to one space, trim, and drop whitespace in
/// front of `. , ! ? ; :`.
pub fn normalize_text(text: &str) -> String {
    let collapsed = WHITESPACE.replace_all(text, " ");
    SPACE_BEFORE_PUNCTUATION
        .replace_all(collapsed.trim(), "$1")
        .into_owned()
}
