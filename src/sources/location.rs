use std::path::{Path, PathBuf};

use url::Url;

use crate::errors::{ScrapeError, ScrapeResult};

/// Where a feed document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Remote(Url),
    Local(PathBuf),
}

impl FeedLocation {
    /// `http(s)://` URLs are remote, `file://` URLs and existing paths are
    /// local. Anything else cannot be a feed source.
    pub fn parse(source: &str) -> ScrapeResult<Self> {
        let source = source.trim();
        if source.is_empty() {
            return Err(ScrapeError::InvalidFeedSource(
                "empty feed source".to_string(),
            ));
        }

        if let Ok(url) = Url::parse(source) {
            match url.scheme() {
                "http" | "https" => return Ok(FeedLocation::Remote(url)),
                "file" => {
                    return url.to_file_path().map(FeedLocation::Local).map_err(|_| {
                        ScrapeError::InvalidFeedSource(format!("bad file URL: {}", source))
                    })
                }
                _ => {}
            }
        }

        let path = Path::new(source);
        if path.exists() {
            return Ok(FeedLocation::Local(path.to_path_buf()));
        }

        Err(ScrapeError::InvalidFeedSource(format!(
            "{} is neither an http(s) URL nor an existing file",
            source
        )))
    }

    pub fn describe(&self) -> String {
        match self {
            FeedLocation::Remote(url) => url.to_string(),
            FeedLocation::Local(path) => path.display().to_string(),
        }
    }
}
