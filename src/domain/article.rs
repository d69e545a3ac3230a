use serde::{Deserialize, Serialize};

use super::{ExtractedContent, FeedEntry};

/// The output unit of a pipeline run: feed metadata merged with the
/// extracted page content, or a degraded record carrying only the URL,
/// its domain and the failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub url: String,
    pub domain: String,
    pub category: String,
    pub feed_title: String,
    pub feed_summary: String,
    pub published_date: String,
    pub page_title: String,
    pub article_title: String,
    pub h1s: Vec<String>,
    pub main_text: String,
    pub images: Vec<String>,
    pub external_links: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ArticleRecord {
    /// Merge a feed entry with the content extracted from its page.
    /// The two field sets are disjoint, nothing is overwritten.
    pub fn complete(entry: FeedEntry, content: ExtractedContent) -> Self {
        Self {
            url: entry.link,
            domain: content.domain,
            category: entry.category,
            feed_title: entry.title,
            feed_summary: entry.summary,
            published_date: entry.published,
            page_title: content.page_title,
            article_title: content.article_title,
            h1s: content.h1s,
            main_text: content.main_text,
            images: content.images,
            external_links: content.external_links,
            error: None,
        }
    }

    pub fn degraded(url: String, domain: String, error: String) -> Self {
        Self {
            url,
            domain,
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Reliability of a run, as seen from its records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub complete: usize,
    pub degraded: usize,
}

impl RunSummary {
    pub fn from_records(records: &[ArticleRecord]) -> Self {
        let degraded = records.iter().filter(|r| r.is_degraded()).count();
        Self {
            total: records.len(),
            complete: records.len() - degraded,
            degraded,
        }
    }
}
