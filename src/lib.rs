//! Feed-driven article scraper.
//!
//! Entries of an RSS/Atom feed are fetched with a retrying HTTP client,
//! their pages reduced to title, text and images, and merged with the feed
//! metadata into [`domain::ArticleRecord`]s.

pub mod cascade;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod http;
pub mod pacing;
pub mod services;
pub mod sources;
