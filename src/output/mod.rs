//! Output module for persisting scraped apps and reporting run statistics
//!
//! This module handles:
//! - Appending each completed batch to the dated CSV files
//! - Keeping batches in memory for embedding and tests
//! - Accumulating and printing crawl statistics

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::CsvOutput;
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{MemoryOutput, OutputError, OutputHandler, OutputResult};
