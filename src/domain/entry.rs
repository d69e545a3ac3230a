use serde::{Deserialize, Serialize};

/// Category used when a feed entry carries no usable category information.
pub const DEFAULT_CATEGORY: &str = "general";

/// One feed item's metadata, before the linked page is fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    pub category: String,
    pub summary: String,
    pub published: String,
}

impl FeedEntry {
    pub fn new(title: String, link: String) -> Self {
        Self {
            title,
            link,
            category: DEFAULT_CATEGORY.to_string(),
            summary: String::new(),
            published: String::new(),
        }
    }

    pub fn with_category(mut self, category: String) -> Self {
        self.category = category;
        self
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_published(mut self, published: String) -> Self {
        self.published = published;
        self
    }
}
