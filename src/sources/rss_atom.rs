use feed_rs::parser;
use tracing::{info, warn};

use crate::domain::FeedEntry;
use crate::errors::{ScrapeError, ScrapeResult};
use crate::http::{FetchConfig, HttpTransport, ResilientFetcher};
use crate::sources::category::{resolve_category, CategoryHints};
use crate::sources::location::FeedLocation;

/// Turns RSS / Atom / JSON Feed documents into ordered entry descriptors.
/// Stateless; one instance can serve any number of feeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct FeedIngestor;

impl FeedIngestor {
    pub fn new() -> Self {
        Self
    }

    /// Read the feed at `location` and parse it. A feed that cannot be
    /// reached or parsed yields no entries; the failure is only logged.
    pub fn parse<T: HttpTransport>(
        &self,
        location: &FeedLocation,
        fetcher: &ResilientFetcher<T>,
        config: &FetchConfig,
    ) -> Vec<FeedEntry> {
        info!(feed = %location.describe(), "Fetching feed");

        let entries = self
            .read(location, fetcher, config)
            .and_then(|bytes| self.parse_bytes(&bytes));

        match entries {
            Ok(entries) => {
                info!(count = entries.len(), "Found entries in feed");
                entries
            }
            Err(e) => {
                warn!(feed = %location.describe(), error = %e, "Could not load feed");
                Vec::new()
            }
        }
    }

    /// Parse raw feed bytes, preserving document order.
    pub fn parse_bytes(&self, bytes: &[u8]) -> ScrapeResult<Vec<FeedEntry>> {
        let feed = parser::parse(bytes).map_err(|e| ScrapeError::FeedParse(e.to_string()))?;

        Ok(feed.entries.into_iter().map(Self::entry_from).collect())
    }

    fn read<T: HttpTransport>(
        &self,
        location: &FeedLocation,
        fetcher: &ResilientFetcher<T>,
        config: &FetchConfig,
    ) -> ScrapeResult<Vec<u8>> {
        match location {
            FeedLocation::Remote(url) => Ok(fetcher.get(url.as_str(), config)?.body),
            FeedLocation::Local(path) => Ok(std::fs::read(path)?),
        }
    }

    fn entry_from(entry: feed_rs::model::Entry) -> FeedEntry {
        let category = resolve_category(&CategoryHints::from_entry(&entry));

        let title = entry
            .title
            .map(|t| t.content.trim().to_string())
            .unwrap_or_default();

        let link = article_link(entry.links);

        let summary = entry
            .summary
            .map(|s| s.content.trim().to_string())
            .unwrap_or_default();

        let published = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default();

        FeedEntry::new(title, link)
            .with_category(category)
            .with_summary(summary)
            .with_published(published)
    }
}

/// The entry's alternate link (`rel` absent or `alternate`), else its first
/// link. Atom entries may list `replies`, `edit` or `self` links first.
fn article_link(links: Vec<feed_rs::model::Link>) -> String {
    let alternate = links
        .iter()
        .position(|l| matches!(l.rel.as_deref(), None | Some("alternate")));

    links
        .into_iter()
        .nth(alternate.unwrap_or(0))
        .map(|l| l.href)
        .unwrap_or_default()
}
