use thiserror::Error;

/// Failure of a single HTTP fetch.
///
/// Everything except `InvalidUrl` and `RetriesExhausted` is a transient
/// network failure and is retried by the fetcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("All {attempts} attempts failed, last error: {last}")]
    RetriesExhausted { attempts: u32, last: Box<FetchError> },
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            FetchError::InvalidUrl(_) | FetchError::RetriesExhausted { .. }
        )
    }

    /// The underlying failure, looking through `RetriesExhausted`.
    pub fn root(&self) -> &FetchError {
        match self {
            FetchError::RetriesExhausted { last, .. } => last.root(),
            other => other,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ScrapeError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid feed source: {0}")]
    InvalidFeedSource(String),

    // Network errors
    #[error(transparent)]
    Fetch(#[from] FetchError),

    // Parsing errors
    #[error("Feed parsing failed: {0}")]
    FeedParse(String),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
