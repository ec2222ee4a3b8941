use crate::config::types::{CatalogConfig, Config, HttpConfig, OutputConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    if !config.page_url_template.contains("{page}") {
        return Err(ConfigError::Validation(format!(
            "page_url_template must contain a {{page}} placeholder, got '{}'",
            config.page_url_template
        )));
    }

    // The template must be a valid URL once the placeholder is filled in
    let sample = config.page_url_template.replace("{page}", "1");
    Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid page_url_template: {}", e)))?;

    if let Some(landing) = &config.landing_url {
        Url::parse(landing)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid landing_url: {}", e)))?;
    }

    // Either a landing page for range discovery or a complete fixed range
    match (config.first_page, config.last_page) {
        (None, None) => {
            if config.landing_url.is_none() {
                return Err(ConfigError::Validation(
                    "either landing_url or a fixed first_page/last_page range is required"
                        .to_string(),
                ));
            }
        }
        (Some(first), Some(last)) => {
            if first < 1 {
                return Err(ConfigError::Validation(format!(
                    "first_page must be >= 1, got {}",
                    first
                )));
            }
            if last < first {
                return Err(ConfigError::Validation(format!(
                    "last_page must be >= first_page, got {}..{}",
                    first, last
                )));
            }
        }
        _ => {
            return Err(ConfigError::Validation(
                "first_page and last_page must be given together".to_string(),
            ));
        }
    }

    if let Some(symbol) = &config.currency_symbol {
        if symbol.is_empty() {
            return Err(ConfigError::Validation(
                "currency_symbol cannot be empty".to_string(),
            ));
        }
    }

    validate_selector(&config.price_selector)?;
    validate_selector(&config.title_selector)?;
    validate_selector(&config.indicator_selector)?;

    Ok(())
}

/// Validates that a CSS selector string parses
fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })?;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_none() && config.database_path.is_none() {
        return Err(ConfigError::Validation(
            "at least one of csv_path or database_path must be configured".to_string(),
        ));
    }

    if let Some(path) = &config.csv_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "csv_path cannot be empty".to_string(),
            ));
        }
    }

    if let Some(path) = &config.database_path {
        if path.is_empty() {
            return Err(ConfigError::Validation(
                "database_path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
