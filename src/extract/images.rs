use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::domain::content::MAX_IMAGES;

/// Declared dimensions below this are treated as icons or logos.
pub const MIN_DIMENSION: i64 = 100;

static IMG: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("img selector is valid"));

/// Absolute image URLs in document order, without deduplication, capped
/// at [`MAX_IMAGES`]. Images declared smaller than 100px in either
/// dimension and GIFs are skipped.
pub fn extract_images(document: &Html, base: &Url) -> Vec<String> {
    document
        .root_element()
        .select(&IMG)
        .filter_map(|img| image_url(img, base))
        .take(MAX_IMAGES)
        .collect()
}

fn image_url(img: ElementRef<'_>, base: &Url) -> Option<String> {
    let element = img.value();
    let src = element
        .attr("src")
        .filter(|s| !s.trim().is_empty())
        .or_else(|| element.attr("data-src").filter(|s| !s.trim().is_empty()))?;

    if is_too_small(element.attr("width"), element.attr("height")) {
        return None;
    }

    let resolved = base.join(src.trim()).ok()?;
    if resolved.path().to_ascii_lowercase().ends_with(".gif") {
        return None;
    }

    Some(resolved.to_string())
}

/// Only applies when both dimensions are declared as integers.
fn is_too_small(width: Option<&str>, height: Option<&str>) -> bool {
    let parse = |v: Option<&str>| v.and_then(|v| v.trim().parse::<i64>().ok());

    match (parse(width), parse(height)) {
        (Some(w), Some(h)) => w < MIN_DIMENSION || h < MIN_DIMENSION,
        _ => false,
    }
}
