pub mod identity;
pub mod config;
pub mod transport;
pub mod decode;
pub mod fetcher;

pub use config::FetchConfig;
pub use fetcher::ResilientFetcher;
pub use identity::{FixedIdentity, IdentitySelector, RandomIdentity, USER_AGENTS};
pub use transport::{FetchResult, HttpMethod, HttpRequest, HttpTransport, ReqwestTransport};
