//! Fixed-size batch scheduling of page scrapes
//!
//! [`BatchCrawler`] is a finite, pull-based sequence of batch results. The
//! caller asks for the next batch, persists it, and only then asks again, so
//! results reach disk one completed batch at a time.

use crate::config::CrawlerConfig;
use crate::crawler::page::scrape_app_page;
use crate::record::ScrapedRecord;
use futures::future::join_all;
use rand::Rng;
use reqwest::Client;
use std::collections::VecDeque;
use std::time::Duration;

/// Scrapes a list of URLs in batches with a randomized pause between batches
pub struct BatchCrawler {
    client: Client,
    pending: VecDeque<String>,
    batch_size: usize,
    min_delay: u64,
    max_delay: u64,
    batches_done: usize,
    total_batches: usize,
}

impl BatchCrawler {
    /// Creates a crawler over `urls`
    ///
    /// `reqwest::Client` is reference counted, so the clone shares the
    /// caller's connection pool.
    pub fn new(client: &Client, urls: Vec<String>, config: &CrawlerConfig) -> Self {
        let batch_size = config.batch_size.max(1);
        let total_batches = urls.len().div_ceil(batch_size);

        Self {
            client: client.clone(),
            pending: urls.into(),
            batch_size,
            min_delay: config.min_batch_delay,
            max_delay: config.max_batch_delay.max(config.min_batch_delay),
            batches_done: 0,
            total_batches,
        }
    }

    pub fn total_batches(&self) -> usize {
        self.total_batches
    }

    pub fn batches_done(&self) -> usize {
        self.batches_done
    }

    /// Scrapes the next batch concurrently
    ///
    /// Waits a random delay before every batch except the first. Returns
    /// `None` once all URLs have been scraped; the sequence cannot be
    /// restarted.
    pub async fn next_batch(&mut self) -> Option<Vec<ScrapedRecord>> {
        if self.pending.is_empty() {
            return None;
        }

        if self.batches_done > 0 {
            politeness_delay(self.min_delay, self.max_delay).await;
        }

        let take = self.batch_size.min(self.pending.len());
        let batch: Vec<String> = self.pending.drain(..take).collect();

        tracing::info!(
            "Scraping batch {} of {} ({} pages)",
            self.batches_done + 1,
            self.total_batches,
            batch.len()
        );

        let client = &self.client;
        let results = join_all(batch.iter().map(|url| scrape_app_page(client, url))).await;

        self.batches_done += 1;
        Some(results)
    }
}

/// Sleeps for a uniformly random duration in `[min_ms, max_ms]`
pub async fn politeness_delay(min_ms: u64, max_ms: u64) {
    let millis = if max_ms > min_ms {
        rand::thread_rng().gen_range(min_ms..=max_ms)
    } else {
        min_ms
    };

    if millis > 0 {
        tracing::debug!("Waiting {}ms before next batch", millis);
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }
}
