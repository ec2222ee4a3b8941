use serde::Deserialize;

/// Main configuration structure for Shelf-Scrape
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Catalog location and extraction configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// URL of the landing page used to discover the page range.
    /// Optional when a fixed range is given.
    #[serde(rename = "landing-url")]
    pub landing_url: Option<String>,

    /// URL template for catalog pages; must contain a `{page}` placeholder
    /// (e.g. "https://books.toscrape.com/catalogue/page-{page}.html")
    #[serde(rename = "page-url-template")]
    pub page_url_template: String,

    /// First page to crawl; together with `last-page` this bypasses the
    /// landing-page range lookup entirely
    #[serde(rename = "first-page")]
    pub first_page: Option<u32>,

    /// Last page to crawl (inclusive)
    #[serde(rename = "last-page")]
    pub last_page: Option<u32>,

    /// Explicit currency prefix to strip from price text. When absent, the
    /// first Unicode scalar of the price text is stripped instead.
    #[serde(rename = "currency-symbol")]
    pub currency_symbol: Option<String>,

    /// CSS selector for price elements
    #[serde(rename = "price-selector", default = "default_price_selector")]
    pub price_selector: String,

    /// CSS selector for title-bearing links; the `title` attribute of each
    /// match is taken as the record title
    #[serde(rename = "title-selector", default = "default_title_selector")]
    pub title_selector: String,

    /// CSS selector for the pagination indicator ("Page 1 of 50")
    #[serde(rename = "indicator-selector", default = "default_indicator_selector")]
    pub indicator_selector: String,
}

fn default_price_selector() -> String {
    "p.price_color".to_string()
}

fn default_title_selector() -> String {
    "a[title]".to_string()
}

fn default_indicator_selector() -> String {
    "li.current".to_string()
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Total request timeout in seconds
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("shelf-scrape/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Output configuration; at least one sink must be configured
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV output file (append mode, header written once)
    #[serde(rename = "csv-path")]
    pub csv_path: Option<String>,

    /// Path to the SQLite database file
    #[serde(rename = "database-path")]
    pub database_path: Option<String>,
}
