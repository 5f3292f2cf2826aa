//! App-Harvest: an App Store listing crawler
//!
//! This crate scrapes App Store listing pages for structured metadata and
//! developer contact emails, follows "customers also bought" shelves to
//! discover more apps, and appends the results to flat CSV files.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod input;
pub mod output;
pub mod record;
pub mod url;

use thiserror::Error;

/// Main error type for App-Harvest operations
///
/// Only run-level failures are represented here. Failures that concern a
/// single page (network errors, missing markup, undecodable emails) are
/// absorbed where they happen and show up as missing fields in the record.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for App-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{scrape_app_page, BatchCrawler, Frontier};
pub use record::{InAppPurchase, ScrapedRecord};
pub use url::{app_id_from_url, to_us_storefront};
