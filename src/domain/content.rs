use serde::{Deserialize, Serialize};

/// Upper bound on the number of images kept per page.
pub const MAX_IMAGES: usize = 10;

/// What the content extractor derives from one fetched page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    pub domain: String,
    pub page_title: String,
    pub article_title: String,
    /// Every non-blank `<h1>` text in document order.
    pub h1s: Vec<String>,
    pub main_text: String,
    /// Absolute URLs in document order, at most [`MAX_IMAGES`].
    pub images: Vec<String>,
    /// Absolute links to other hosts, deduplicated.
    pub external_links: Vec<String>,
}
