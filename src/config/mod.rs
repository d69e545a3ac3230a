use std::str::FromStr;
use std::time::Duration;

use crate::errors::{ScrapeError, ScrapeResult};
use crate::http::config::{
    DEFAULT_ACCEPT_LANGUAGE, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT,
};
use crate::http::FetchConfig;

pub const DEFAULT_MAX_ARTICLES: usize = 10;
pub const DEFAULT_POLITENESS_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub user_agent: Option<String>,
    pub accept_language: String,
    pub max_articles: usize,
    pub politeness_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            user_agent: None,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            max_articles: DEFAULT_MAX_ARTICLES,
            politeness_delay: DEFAULT_POLITENESS_DELAY,
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> ScrapeResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> ScrapeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let timeout = parse_var::<u64, _>(&lookup, "FEEDSCRAPE_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let max_retries =
            parse_var(&lookup, "FEEDSCRAPE_MAX_RETRIES")?.unwrap_or(defaults.max_retries);

        let retry_delay = parse_var::<u64, _>(&lookup, "FEEDSCRAPE_RETRY_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_delay);

        let user_agent = lookup("FEEDSCRAPE_USER_AGENT").filter(|ua| !ua.trim().is_empty());

        let accept_language = lookup("FEEDSCRAPE_ACCEPT_LANGUAGE")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.accept_language);

        let max_articles =
            parse_var(&lookup, "FEEDSCRAPE_MAX_ARTICLES")?.unwrap_or(defaults.max_articles);

        let politeness_delay = parse_var::<u64, _>(&lookup, "FEEDSCRAPE_POLITENESS_DELAY_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.politeness_delay);

        Ok(Self {
            timeout,
            max_retries,
            retry_delay,
            user_agent,
            accept_language,
            max_articles,
            politeness_delay,
        })
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_timeout(self.timeout)
            .with_max_retries(self.max_retries)
            .with_retry_delay(self.retry_delay)
            .with_identity_override(self.user_agent.clone())
            .with_accept_language(self.accept_language.clone())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> ScrapeResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            ScrapeError::Config(format!("{} must be a non-negative integer, got '{}'", key, raw))
        }),
    }
}
