//! Ordered fallback chains.
//!
//! Title resolution, container selection and category resolution are all
//! "try these rules in order, the first one that yields something wins".
//! Each rule is a plain function so a chain reads as a list.

/// A single rule in a fallback chain.
pub type Rule<I, O> = fn(&I) -> Option<O>;

/// Evaluate `rules` in order and return the first result. Later rules are
/// never called once an earlier one matched.
pub fn first_match<I: ?Sized, O>(input: &I, rules: &[Rule<I, O>]) -> Option<O> {
    rules.iter().find_map(|rule| rule(input))
}

/// Treat empty (or whitespace-only) strings as "no match".
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
