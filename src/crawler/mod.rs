//! Crawler module for App Store page fetching and processing
//!
//! This module contains the crawling logic, including:
//! - HTTP fetching that absorbs failures
//! - The single-page scrape with secondary email discovery
//! - Fixed-size batch scheduling with politeness delays
//! - The frontier and overall crawl coordination

mod batch;
mod coordinator;
mod fetcher;
mod frontier;
mod page;

pub use batch::{politeness_delay, BatchCrawler};
pub use coordinator::{load_frontier, run_crawl, Coordinator};
pub use fetcher::{build_http_client, fetch_page, fetch_url, FetchResult};
pub use frontier::Frontier;
pub use page::{emails_from_url, scrape_app_page};
