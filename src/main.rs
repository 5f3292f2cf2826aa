//! App-Harvest main entry point
//!
//! This is the command-line interface for the App-Harvest listing crawler.

use app_harvest::config::{load_config_with_hash, Config};
use app_harvest::crawler::{load_frontier, run_crawl};
use app_harvest::output::print_statistics;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// App-Harvest: an App Store listing crawler
///
/// App-Harvest scrapes App Store listings for metadata and developer contact
/// emails, follows related-app shelves up to a depth bound, and appends the
/// results to dated CSV files.
#[derive(Parser, Debug)]
#[command(name = "app-harvest")]
#[command(version = "1.0.0")]
#[command(about = "An App Store listing and contact email crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Number of related-app expansion rounds (overrides max-depth)
    #[arg(short, long, value_name = "N")]
    depth: Option<u32>,

    /// Scrape the input list without writing its rows
    #[arg(long)]
    skip_first_step: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if cli.skip_first_step {
        config.crawler.record_first_step = false;
    }

    if cli.dry_run {
        handle_dry_run(&config)?;
    } else {
        handle_crawl(config).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("app_harvest=info,warn"),
            1 => EnvFilter::new("app_harvest=debug,info"),
            2 => EnvFilter::new("app_harvest=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== App-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Batch size: {}", config.crawler.batch_size);
    println!(
        "  Batch delay: {}-{}ms",
        config.crawler.min_batch_delay, config.crawler.max_batch_delay
    );
    println!("  Request timeout: {}s", config.crawler.request_timeout);
    println!("  Record first step: {}", config.crawler.record_first_step);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.value);

    println!("\nInput:");
    println!("  Apps: {}", config.input.apps_path);
    println!("  Ignore list: {}", config.input.ignore_path);

    println!("\nOutput:");
    println!("  Directory: {}", config.output.directory);
    println!("  Email columns: {}", config.output.email_columns);

    let frontier = load_frontier(config)?;
    println!(
        "\nFirst step ({} apps, {} ignored):",
        frontier.pending().len(),
        frontier.ignored_count()
    );
    for url in frontier.pending() {
        println!("  - {}", url);
    }

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would start crawling with {} app URLs",
        frontier.pending().len()
    );

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let output_directory = config.output.directory.clone();

    match run_crawl(config).await {
        Ok(stats) => {
            tracing::info!("Crawl completed successfully");
            print_statistics(&stats, &output_directory);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
