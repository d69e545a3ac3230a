use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use super::identity::{IdentitySelector, RandomIdentity};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "fr-FR,fr;q=0.9,en-US;q=0.8,en;q=0.7";

/// Settings for one fetch call. Cloning is cheap, the identity selector is shared.
#[derive(Clone)]
pub struct FetchConfig {
    pub timeout: Duration,
    /// Retries after the first attempt; `max_retries + 1` attempts in total.
    pub max_retries: u32,
    /// Fixed pause between a failed attempt and the next one.
    pub retry_delay: Duration,
    pub identity: Arc<dyn IdentitySelector>,
    /// When set, used for every attempt and the selector is never consulted.
    pub identity_override: Option<String>,
    pub accept_language: String,
}

impl FetchConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_identity(mut self, identity: Arc<dyn IdentitySelector>) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_identity_override(mut self, identity: Option<String>) -> Self {
        self.identity_override = identity;
        self
    }

    pub fn with_accept_language(mut self, accept_language: String) -> Self {
        self.accept_language = accept_language;
        self
    }

    /// Identity for the next attempt.
    pub fn next_identity(&self) -> String {
        match &self.identity_override {
            Some(identity) => identity.clone(),
            None => self.identity.next_identity(),
        }
    }

    /// Headers sent with every attempt, identity first.
    pub fn headers_for_attempt(&self) -> Vec<(String, String)> {
        vec![
            ("User-Agent".to_string(), self.next_identity()),
            ("Accept".to_string(), DEFAULT_ACCEPT.to_string()),
            ("Accept-Language".to_string(), self.accept_language.clone()),
        ]
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            identity: Arc::new(RandomIdentity::default()),
            identity_override: None,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("identity_override", &self.identity_override)
            .field("accept_language", &self.accept_language)
            .finish_non_exhaustive()
    }
}
