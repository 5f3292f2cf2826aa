//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop:
//! - Loading input URLs and the ignore list into the initial frontier
//! - Scraping each round through the batch crawler
//! - Handing every completed batch to the output handler
//! - Expanding the frontier with related apps up to the depth bound

use crate::config::Config;
use crate::crawler::batch::{politeness_delay, BatchCrawler};
use crate::crawler::build_http_client;
use crate::crawler::frontier::Frontier;
use crate::input::read_first_column;
use crate::output::{CrawlStatistics, CsvOutput, OutputHandler};
use crate::record::ScrapedRecord;
use crate::HarvestError;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    output: Box<dyn OutputHandler + Send>,
    stats: CrawlStatistics,
}

impl Coordinator {
    /// Creates a coordinator that appends to today's CSV files
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, HarvestError> {
        let output = CsvOutput::for_today(&config.output);
        Self::with_output(config, Box::new(output))
    }

    /// Creates a coordinator with a custom output handler
    pub fn with_output(
        config: Config,
        output: Box<dyn OutputHandler + Send>,
    ) -> Result<Self, HarvestError> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout),
        )?;

        Ok(Self {
            config,
            client,
            output,
            stats: CrawlStatistics::default(),
        })
    }

    /// Builds the initial frontier from the configured input files
    pub fn load_frontier(&self) -> Result<Frontier, HarvestError> {
        load_frontier(&self.config)
    }

    /// Runs the crawl loop until the frontier is exhausted
    ///
    /// A page that fails never aborts the run; only output failures do.
    pub async fn run(&mut self, mut frontier: Frontier) -> Result<CrawlStatistics, HarvestError> {
        let depth = self.config.crawler.max_depth;
        tracing::info!(
            "Starting crawl with depth {} ({} apps already processed)",
            depth,
            frontier.ignored_count()
        );

        while !frontier.is_empty() {
            if frontier.completed_steps() > 0 {
                politeness_delay(
                    self.config.crawler.min_batch_delay,
                    self.config.crawler.max_batch_delay,
                )
                .await;
            }
            frontier = self.crawl_step(frontier).await?;
        }

        self.output.finalize()?;
        tracing::info!("Crawl complete after {} steps", self.stats.steps);
        Ok(self.stats.clone())
    }

    /// Scrapes one round and returns the frontier for the next one
    pub async fn crawl_step(&mut self, mut frontier: Frontier) -> Result<Frontier, HarvestError> {
        let step = frontier.completed_steps() + 1;
        let record = step > 1 || self.config.crawler.record_first_step;
        let urls = frontier.take_pending();

        let mut crawler = BatchCrawler::new(&self.client, urls, &self.config.crawler);
        tracing::info!(
            "Step {}: scraping {} batches of up to {} pages{}",
            step,
            crawler.total_batches(),
            self.config.crawler.batch_size,
            if record { "" } else { " (not recorded)" }
        );

        let mut results: Vec<ScrapedRecord> = Vec::new();
        while let Some(batch) = crawler.next_batch().await {
            self.stats.record_batch(&batch);
            if record {
                self.output.record_batch(&batch)?;
            }
            results.extend(batch);
        }
        self.stats.steps += 1;

        let next = frontier.advance(&results, self.config.crawler.max_depth);
        if !next.is_empty() {
            tracing::info!(
                "Found {} more apps to scrape, continuing to step {} of {}",
                next.pending().len(),
                step + 1,
                self.config.crawler.max_depth + 1
            );
        }
        Ok(next)
    }
}

/// Reads the input and ignore lists into the initial frontier
pub fn load_frontier(config: &Config) -> Result<Frontier, HarvestError> {
    let urls = read_first_column(Path::new(&config.input.apps_path))?;
    let ignored = read_first_column(Path::new(&config.input.ignore_path))?;

    tracing::info!(
        "Loaded {} input URLs and {} ignored IDs",
        urls.len(),
        ignored.len()
    );

    Ok(Frontier::new(urls, ignored))
}

/// Runs a complete crawl with the CSV output handler
///
/// 1. Read the input URLs and the ignore list
/// 2. Build the HTTP client
/// 3. Scrape the frontier in batches, appending each batch to CSV
/// 4. Expand the frontier with related apps up to the configured depth
pub async fn run_crawl(config: Config) -> Result<CrawlStatistics, HarvestError> {
    let mut coordinator = Coordinator::new(config)?;
    let frontier = coordinator.load_frontier()?;
    coordinator.run(frontier).await
}
