use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use feedscrape::cli::{Cli, Commands, GlobalArgs};
use feedscrape::config::Config;
use feedscrape::domain::{ArticleRecord, RunSummary};
use feedscrape::errors::ScrapeResult;
use feedscrape::http::{ReqwestTransport, ResilientFetcher};
use feedscrape::services::PipelineService;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "feedscrape=debug"
    } else {
        "feedscrape=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> ScrapeResult<()> {
    // Load configuration, flags win over the environment
    let mut config = Config::from_env()?;
    apply_overrides(&mut config, &cli.global);

    let fetcher = ResilientFetcher::new(ReqwestTransport::new());
    let service = PipelineService::new(fetcher, config.fetch_config());
    let pretty = cli.global.pretty;

    match cli.command {
        Commands::Run {
            feed,
            max_articles,
            delay_ms,
        } => cmd_run(&service, &config, &feed, max_articles, delay_ms, pretty),
        Commands::Entries { feed } => {
            let entries = service.entries(&feed)?;
            print_json(&entries, pretty)
        }
        Commands::Extract { url } => {
            let content = service.extract_page(&url)?;
            print_json(&content, pretty)
        }
    }
}

fn apply_overrides(config: &mut Config, global: &GlobalArgs) {
    if let Some(user_agent) = &global.user_agent {
        config.user_agent = Some(user_agent.clone());
    }
    if let Some(max_retries) = global.max_retries {
        config.max_retries = max_retries;
    }
    if let Some(timeout_secs) = global.timeout_secs {
        config.timeout = Duration::from_secs(timeout_secs);
    }
}

fn cmd_run(
    service: &PipelineService<ReqwestTransport>,
    config: &Config,
    feed: &str,
    max_articles: Option<usize>,
    delay_ms: Option<u64>,
    pretty: bool,
) -> ScrapeResult<()> {
    let max_articles = max_articles.unwrap_or(config.max_articles);
    let delay = delay_ms
        .map(Duration::from_millis)
        .unwrap_or(config.politeness_delay);

    let records: Vec<ArticleRecord> = service.run(feed, max_articles, delay)?;

    let summary = RunSummary::from_records(&records);
    if summary.degraded > 0 {
        tracing::warn!(
            degraded = summary.degraded,
            total = summary.total,
            "Some articles could not be scraped"
        );
    }

    print_json(&records, pretty)
}

fn print_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> ScrapeResult<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}
