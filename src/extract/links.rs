use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use super::domain_of;

static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

/// Absolute outbound links whose host (and explicit port) differs from the
/// page's, deduplicated in first-seen order. Links without a host
/// (`mailto:`, `javascript:`, ...) are skipped.
pub fn external_links(document: &Html, base: &Url) -> Vec<String> {
    let page_domain = domain_of(base);
    let mut seen = HashSet::new();

    document
        .root_element()
        .select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.trim().is_empty())
        .filter_map(|href| base.join(href.trim()).ok())
        .filter(|url| {
            let domain = domain_of(url);
            !domain.is_empty() && domain != page_domain
        })
        .map(|url| url.to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
