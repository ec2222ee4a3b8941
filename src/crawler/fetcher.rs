//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper:
//! - Building an HTTP client with timeouts and a user agent
//! - GET requests for catalog pages
//! - Error classification (network vs. HTTP status)
//!
//! One outbound request per call. No retries, no caching.

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// A single page fetch failure
///
/// Callers at the page boundary log these and skip the page; they are never
/// fatal to the crawl on their own.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, DNS, timeout, or body-read failure
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} fetching {url}")]
    HttpStatus { url: String, status: u16 },
}

/// Builds an HTTP client from the configuration
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one catalog page
///
/// Issues a single GET request and returns the response body on a 2xx
/// status. Non-2xx responses become [`FetchError::HttpStatus`]; transport
/// failures (connect, DNS, timeout, interrupted body) become
/// [`FetchError::Network`].
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The absolute URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| FetchError::Network {
        url: url.to_string(),
        message: e.to_string(),
    })
}
