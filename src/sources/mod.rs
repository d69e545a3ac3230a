pub mod location;
pub mod category;
pub mod rss_atom;

pub use category::{resolve_category, CategoryHints};
pub use location::FeedLocation;
pub use rss_atom::FeedIngestor;
