use crate::config::types::{Config, CrawlerConfig, InputConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_input_config(&config.input)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 || config.batch_size > 50 {
        return Err(ConfigError::Validation(format!(
            "batch_size must be between 1 and 50, got {}",
            config.batch_size
        )));
    }

    if config.max_batch_delay < config.min_batch_delay {
        return Err(ConfigError::Validation(format!(
            "max_batch_delay ({}ms) must be >= min_batch_delay ({}ms)",
            config.max_batch_delay, config.min_batch_delay
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent value cannot be empty".to_string(),
        ));
    }

    // Must be a valid header value
    if config.value.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(
            "user agent value cannot contain control characters".to_string(),
        ));
    }

    Ok(())
}

fn validate_input_config(config: &InputConfig) -> Result<(), ConfigError> {
    if config.apps_path.is_empty() {
        return Err(ConfigError::Validation(
            "apps_path cannot be empty".to_string(),
        ));
    }

    if config.ignore_path.is_empty() {
        return Err(ConfigError::Validation(
            "ignore_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    if config.email_columns < 1 || config.email_columns > 100 {
        return Err(ConfigError::Validation(format!(
            "email_columns must be between 1 and 100, got {}",
            config.email_columns
        )));
    }

    Ok(())
}
