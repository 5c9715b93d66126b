//! Book-Crawler main entry point
//!
//! This is the command-line interface for the catalog crawler.

use book_crawler::config::{load_config_with_hash, Config};
use book_crawler::crawler::crawl;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Book-Crawler: crawls a paginated book catalog into JSON records
///
/// Without a configuration file the crawler uses its built-in defaults:
/// 50 index pages of https://books.toscrape.com written to ./results.
#[derive(Parser, Debug)]
#[command(name = "book-crawler")]
#[command(version)]
#[command(about = "Crawls a paginated book catalog into JSON records", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    tracing::info!(
        "Catalog: {} ({} pages), results: {}",
        config.catalog.base_url,
        config.catalog.total_pages,
        config.output.results_dir.display()
    );

    match crawl(config).await {
        Ok(()) => {
            tracing::info!("Crawl completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl could not start: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("book_crawler=info,warn"),
            1 => EnvFilter::new("book_crawler=debug,info"),
            2 => EnvFilter::new("book_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
