use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "feedscrape")]
#[command(about = "Scrape full articles from the entries of an RSS/Atom feed")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Fixed User-Agent for every request (disables rotation)
    #[arg(long, global = true)]
    pub user_agent: Option<String>,

    /// Retries after the first attempt of each request
    #[arg(long, global = true)]
    pub max_retries: Option<u32>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape the articles listed in a feed and print them as JSON
    Run {
        /// Feed URL (http/https) or path to a local feed file
        feed: String,

        /// Maximum number of feed entries to scrape
        #[arg(short = 'n', long)]
        max_articles: Option<usize>,

        /// Pause between two articles, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// List the entries of a feed without visiting the articles
    Entries {
        /// Feed URL (http/https) or path to a local feed file
        feed: String,
    },

    /// Fetch a single page and print its extracted content
    Extract {
        /// Page URL
        url: String,
    },
}
