pub mod entry;
pub mod content;
pub mod article;

pub use entry::{FeedEntry, DEFAULT_CATEGORY};
pub use content::ExtractedContent;
pub use article::{ArticleRecord, RunSummary};
