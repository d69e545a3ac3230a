use std::time::Duration;

use tracing::{info, warn};

use crate::domain::{ArticleRecord, ExtractedContent, FeedEntry, RunSummary};
use crate::errors::ScrapeResult;
use crate::extract::{extract_domain, ContentExtractor};
use crate::http::{FetchConfig, HttpTransport, ResilientFetcher};
use crate::pacing::{Pacer, ThreadPacer};
use crate::sources::{FeedIngestor, FeedLocation};

/// Drives feed entries through fetch and extraction, one at a time.
///
/// A failing entry becomes a degraded record and the run moves on; only an
/// unusable feed source fails the whole run.
pub struct PipelineService<T: HttpTransport> {
    fetcher: ResilientFetcher<T>,
    config: FetchConfig,
    ingestor: FeedIngestor,
    extractor: ContentExtractor,
    pacer: Box<dyn Pacer>,
}

impl<T: HttpTransport> PipelineService<T> {
    pub fn new(fetcher: ResilientFetcher<T>, config: FetchConfig) -> Self {
        Self {
            fetcher,
            config,
            ingestor: FeedIngestor::new(),
            extractor: ContentExtractor::new(),
            pacer: Box::new(ThreadPacer),
        }
    }

    /// Pacer used for the politeness delay between articles.
    pub fn with_pacer(mut self, pacer: Box<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn fetcher(&self) -> &ResilientFetcher<T> {
        &self.fetcher
    }

    /// Entries of the feed, without visiting the linked pages.
    pub fn entries(&self, feed_source: &str) -> ScrapeResult<Vec<FeedEntry>> {
        let location = FeedLocation::parse(feed_source)?;
        Ok(self.ingestor.parse(&location, &self.fetcher, &self.config))
    }

    /// Scrape up to `max_articles` entries of the feed, pausing
    /// `politeness_delay` between consecutive articles.
    pub fn run(
        &self,
        feed_source: &str,
        max_articles: usize,
        politeness_delay: Duration,
    ) -> ScrapeResult<Vec<ArticleRecord>> {
        let mut entries = self.entries(feed_source)?;

        if entries.is_empty() {
            info!(feed = feed_source, "No entries to scrape");
            return Ok(Vec::new());
        }

        entries.truncate(max_articles);
        let total = entries.len();
        info!(total, "Scraping articles");

        let mut records = Vec::with_capacity(total);
        for (index, entry) in entries.into_iter().enumerate() {
            info!(index = index + 1, total, url = %entry.link, "Scraping article");

            records.push(self.scrape_article(entry));

            if index + 1 < total {
                self.pacer.pause(politeness_delay);
            }
        }

        let summary = RunSummary::from_records(&records);
        info!(
            total = summary.total,
            complete = summary.complete,
            degraded = summary.degraded,
            "Scraping finished"
        );

        Ok(records)
    }

    /// Fetch and extract one entry's page. Never fails: errors end up in
    /// the record.
    pub fn scrape_article(&self, entry: FeedEntry) -> ArticleRecord {
        match self.extract_page(&entry.link) {
            Ok(content) => ArticleRecord::complete(entry, content),
            Err(e) => {
                warn!(url = %entry.link, error = %e, "Article scrape failed");
                let domain = extract_domain(&entry.link);
                ArticleRecord::degraded(entry.link, domain, e.to_string())
            }
        }
    }

    /// Fetch `url` and extract its content, using `url` as the base for
    /// relative links.
    pub fn extract_page(&self, url: &str) -> ScrapeResult<ExtractedContent> {
        let html = self.fetcher.fetch_document(url, &self.config)?;
        Ok(self.extractor.extract(&html, url)?)
    }
}
