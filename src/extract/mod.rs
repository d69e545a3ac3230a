//! Best-effort article extraction from arbitrary HTML.
//!
//! Titles, headings and outbound links are read from the untouched
//! document. Main text and images come from a copy with page chrome
//! (scripts, navigation, forms, ...) removed.

pub mod text;
pub mod title;
pub mod images;
pub mod links;

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::ExtractedContent;
use crate::errors::ExtractError;

pub use images::extract_images;
pub use links::external_links;
pub use text::normalize_text;
pub use title::{article_title, h1_texts, page_title};

/// Elements dropped before any text or container selection.
pub const NOISE_ELEMENTS: &[&str] = &[
    "script", "style", "header", "footer", "nav", "aside", "iframe", "noscript", "form", "button",
];

/// Main-content containers, most specific first.
pub const CONTAINER_SELECTORS: &[&str] = &[
    "article",
    "main",
    ".article-content",
    ".post-content",
    ".entry-content",
    "[itemprop=\"articleBody\"]",
];

static NOISE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(&NOISE_ELEMENTS.join(", ")).expect("noise selector is valid")
});

static CONTAINERS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    CONTAINER_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("container selector is valid"))
        .collect()
});

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("body selector is valid"));

#[derive(Debug, Default, Clone, Copy)]
pub struct ContentExtractor;

impl ContentExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Derive titles, headings, outbound links, main text and images from
    /// `html`, resolving relative URLs against `base_url`.
    pub fn extract(&self, html: &str, base_url: &str) -> Result<ExtractedContent, ExtractError> {
        let base = Url::parse(base_url).map_err(|e| ExtractError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let mut document = Html::parse_document(html);

        let page_title = page_title(&document);
        let article_title = article_title(&document);
        let h1s = h1_texts(&document);
        let external_links = external_links(&document, &base);

        remove_noise(&mut document);

        Ok(ExtractedContent {
            domain: domain_of(&base),
            page_title,
            article_title,
            h1s,
            main_text: main_text(&document),
            images: extract_images(&document, &base),
            external_links,
        })
    }
}

/// Detach every noise element from the tree.
pub fn remove_noise(document: &mut Html) {
    let ids: Vec<_> = document
        .root_element()
        .select(&NOISE)
        .map(|element| element.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

fn first_container<'a>(root: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    CONTAINERS
        .iter()
        .find_map(|selector| root.select(selector).next())
}

fn body<'a>(root: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    root.select(&BODY).next()
}

/// Normalised text of the first matching content container, the body when
/// none matches, or an empty string without a body.
pub fn main_text(document: &Html) -> String {
    let root = document.root_element();

    match first_container(&root).or_else(|| body(&root)) {
        Some(element) => normalize_text(&joined_text(element)),
        None => String::new(),
    }
}

fn joined_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Host of `url`, with the port when one is given explicitly.
pub fn extract_domain(url: &str) -> String {
    Url::parse(url).map(|u| domain_of(&u)).unwrap_or_default()
}

fn domain_of(url: &Url) -> String {
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}
