use crate::cascade::{first_match, non_empty, Rule};
use crate::domain::DEFAULT_CATEGORY;

/// Category signals of one feed entry, in the shapes feeds express them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryHints {
    /// `term` of each tag.
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub categories: Vec<String>,
}

impl CategoryHints {
    /// feed-rs folds RSS `<category>` and Atom `<category term label>`
    /// into one list: terms become tags, labels feed the other two rules.
    pub fn from_entry(entry: &feed_rs::model::Entry) -> Self {
        let labels: Vec<String> = entry
            .categories
            .iter()
            .filter_map(|c| c.label.clone())
            .collect();

        Self {
            tags: entry.categories.iter().map(|c| c.term.clone()).collect(),
            category: entry.categories.first().and_then(|c| c.label.clone()),
            categories: labels,
        }
    }
}

const CATEGORY_RULES: &[Rule<CategoryHints, String>] =
    &[first_tag_term, singular_category, first_of_categories];

fn first_tag_term(hints: &CategoryHints) -> Option<String> {
    hints.tags.first().and_then(|term| non_empty(term))
}

fn singular_category(hints: &CategoryHints) -> Option<String> {
    hints.category.as_deref().and_then(non_empty)
}

fn first_of_categories(hints: &CategoryHints) -> Option<String> {
    hints.categories.first().and_then(|c| non_empty(c))
}

/// First tag's term, then the singular category, then the first of the
/// category list, then `"general"`.
pub fn resolve_category(hints: &CategoryHints) -> String {
    first_match(hints, CATEGORY_RULES).unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}
