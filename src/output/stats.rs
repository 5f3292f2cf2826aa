//! Run statistics
//!
//! Counters accumulated by the crawl loop and printed when the run ends.

use crate::record::ScrapedRecord;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Number of app pages scraped (including degraded records)
    pub apps_scraped: u64,

    /// Apps with at least one email
    pub apps_with_emails: u64,

    /// Apps without any email
    pub apps_without_emails: u64,

    /// Sum of distinct emails per app
    pub emails_found: u64,

    /// Pages that could not be fetched at all
    pub pages_failed: u64,

    /// Number of crawl rounds run
    pub steps: u32,
}

impl CrawlStatistics {
    /// Adds one batch of results to the counters
    pub fn record_batch(&mut self, records: &[ScrapedRecord]) {
        for record in records {
            self.apps_scraped += 1;
            if record.has_emails() {
                self.apps_with_emails += 1;
            } else {
                self.apps_without_emails += 1;
            }
            if record.is_minimal() {
                self.pages_failed += 1;
            }
            self.emails_found += record.all_emails().len() as u64;
        }
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics, output_directory: &str) {
    println!("\n=== Crawl Statistics ===\n");
    println!("Results saved to: {}", output_directory);
    println!("  Steps run: {}", stats.steps);
    println!("  Scraped apps: {}", stats.apps_scraped);
    println!("  Apps with emails: {}", stats.apps_with_emails);
    println!("  Apps without emails: {}", stats.apps_without_emails);
    println!("  Pages that failed to load: {}", stats.pages_failed);
    println!("  Total emails found: {}", stats.emails_found);
}
