use std::sync::LazyLock;

use scraper::{Html, Selector};

use crate::cascade::{first_match, non_empty, Rule};

static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("title"));
static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[property="og:title"]"#));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static META_TITLE: LazyLock<Selector> = LazyLock::new(|| selector(r#"meta[name="title"]"#));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("title selector is valid")
}

const ARTICLE_TITLE_RULES: &[Rule<Html, String>] = &[og_title, first_h1, meta_title];

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .and_then(non_empty)
}

fn og_title(document: &Html) -> Option<String> {
    meta_content(document, &OG_TITLE)
}

fn first_h1(document: &Html) -> Option<String> {
    document
        .select(&H1)
        .next()
        .and_then(|h1| non_empty(&h1.text().collect::<String>()))
}

fn meta_title(document: &Html) -> Option<String> {
    meta_content(document, &META_TITLE)
}

/// `og:title`, then the first `<h1>`, then `<meta name="title">`.
pub fn article_title(document: &Html) -> String {
    first_match(document, ARTICLE_TITLE_RULES).unwrap_or_default()
}

/// Trimmed text of every `<h1>` in document order, blank headings skipped.
pub fn h1_texts(document: &Html) -> Vec<String> {
    document
        .select(&H1)
        .filter_map(|h1| non_empty(&h1.text().collect::<String>()))
        .collect()
}

/// Trimmed text of `<title>`.
pub fn page_title(document: &Html) -> String {
    document
        .select(&TITLE)
        .next()
        .map(|t| t.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
