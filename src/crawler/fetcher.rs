//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with a desktop browser identity
//! - GET requests for listing pages and developer pages
//! - Classifying failures for the run log
//!
//! Failures never leave this module as errors. [`fetch_page`] is the single
//! place where a transient failure is absorbed into an absent body.

use crate::config::UserAgentConfig;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Upper bound for a whole request, body included
///
/// # Example
///
/// ```no_run
/// use app_harvest::config::UserAgentConfig;
/// use app_harvest::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.value.as_str())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Redirects are followed by the client. No retries are made.
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | Success |
/// | Any other status | HttpError |
/// | Timeout, connection error, invalid URL | NetworkError |
/// | Body read failure | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else if e.is_builder() {
                format!("Invalid request: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Fetches a page body, absorbing every failure
///
/// # Returns
///
/// * `Some(String)` - The response body of a 2xx response
/// * `None` - Network failure or non-success status (logged as a warning)
pub async fn fetch_page(client: &Client, url: &str) -> Option<String> {
    match fetch_url(client, url).await {
        FetchResult::Success { final_url, body } => {
            if final_url != url {
                tracing::debug!("Fetched {} (redirected to {})", url, final_url);
            }
            Some(body)
        }
        FetchResult::HttpError { status_code } => {
            let reason = StatusCode::from_u16(status_code)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown status");
            tracing::warn!("Failed to fetch page {}: {} {}", url, status_code, reason);
            None
        }
        FetchResult::NetworkError { error } => {
            tracing::warn!("Failed to fetch page {}: {}", url, error);
            None
        }
    }
}
