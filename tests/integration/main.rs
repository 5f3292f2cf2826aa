//! Integration tests for App-Harvest
//!
//! These tests serve listing and developer pages from wiremock servers and
//! drive the scraper and the crawl loop end-to-end.

mod common;
mod crawl_tests;
mod scrape_tests;
