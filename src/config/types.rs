use serde::Deserialize;

/// Desktop Chrome identity presented to the App Store and developer sites
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

/// Main configuration structure for App-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Number of expansion rounds through related apps after the first round
    #[serde(rename = "max-depth", default)]
    pub max_depth: u32,

    /// Number of pages scraped concurrently per batch
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,

    /// Lower bound of the randomized pause between batches (milliseconds)
    #[serde(rename = "min-batch-delay", default = "default_min_batch_delay")]
    pub min_batch_delay: u64,

    /// Upper bound of the randomized pause between batches (milliseconds)
    #[serde(rename = "max-batch-delay", default = "default_max_batch_delay")]
    pub max_batch_delay: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Whether rows from the initial input round are written to disk
    #[serde(rename = "record-first-step", default = "default_true")]
    pub record_first_step: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 0,
            batch_size: default_batch_size(),
            min_batch_delay: default_min_batch_delay(),
            max_batch_delay: default_max_batch_delay(),
            request_timeout: default_request_timeout(),
            record_first_step: true,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Full `User-Agent` header value
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Input file locations
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// CSV whose first column lists App Store URLs to scrape
    #[serde(rename = "apps-path")]
    pub apps_path: String,

    /// CSV whose first column lists app IDs that were already processed
    #[serde(rename = "ignore-path")]
    pub ignore_path: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory the dated CSV files are appended to
    pub directory: String,

    /// Number of `Email N` header columns
    #[serde(rename = "email-columns", default = "default_email_columns")]
    pub email_columns: usize,
}

fn default_batch_size() -> usize {
    5
}

fn default_min_batch_delay() -> u64 {
    3000
}

fn default_max_batch_delay() -> u64 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_email_columns() -> usize {
    10
}
