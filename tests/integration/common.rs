//! Shared fixtures for the integration tests

use app_harvest::config::{Config, CrawlerConfig, InputConfig, OutputConfig, UserAgentConfig};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay
pub fn create_test_config(dir: &Path, max_depth: u32, batch_size: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_depth,
            batch_size,
            min_batch_delay: 0,
            max_batch_delay: 0,
            request_timeout: 5,
            record_first_step: true,
        },
        user_agent: UserAgentConfig::default(),
        input: InputConfig {
            apps_path: dir.join("apps.csv").display().to_string(),
            ignore_path: dir.join("ignore.csv").display().to_string(),
        },
        output: OutputConfig {
            directory: dir.join("results").display().to_string(),
            email_columns: 10,
        },
    }
}

/// A bare listing with a title, an optional contact email in its text and
/// optional "customers also bought" links
pub fn simple_listing(title: &str, email: Option<&str>, related: &[&str]) -> String {
    let shelf: String = related
        .iter()
        .map(|href| {
            format!(
                r#"<a href="{}" data-metrics-location='{{"locationType":"shelfCustomersAlsoBoughtApps"}}'>Related</a>"#,
                href
            )
        })
        .collect();

    format!(
        "<html><body><h1>{}</h1>{}<section>{}</section></body></html>",
        title,
        email.map(|e| format!("<p>Contact: {}</p>", e)).unwrap_or_default(),
        shelf
    )
}

/// Serves `body` with status 200 at `route`
pub async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}
