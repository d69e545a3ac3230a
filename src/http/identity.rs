use rand::seq::IndexedRandom;

/// Desktop browser User-Agent strings rotated between requests.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:109.0) Gecko/20100101 Firefox/119.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/119.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/119.0.0.0",
];

/// Yields the identity (User-Agent) to use for the next request attempt.
pub trait IdentitySelector: Send + Sync {
    fn next_identity(&self) -> String;
}

impl<F> IdentitySelector for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_identity(&self) -> String {
        self()
    }
}

/// Picks a uniformly random entry of the pool on every call.
#[derive(Debug, Clone)]
pub struct RandomIdentity {
    pool: Vec<String>,
}

impl RandomIdentity {
    /// An empty pool falls back to the built-in browser list.
    pub fn new(pool: Vec<String>) -> Self {
        if pool.is_empty() {
            return Self::default();
        }
        Self { pool }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }
}

impl Default for RandomIdentity {
    fn default() -> Self {
        Self {
            pool: USER_AGENTS.iter().map(|ua| ua.to_string()).collect(),
        }
    }
}

impl IdentitySelector for RandomIdentity {
    fn next_identity(&self) -> String {
        self.pool
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_default()
    }
}

/// Always the same identity.
#[derive(Debug, Clone)]
pub struct FixedIdentity(pub String);

impl IdentitySelector for FixedIdentity {
    fn next_identity(&self) -> String {
        self.0.clone()
    }
}
