//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and crawl-loop behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Target-site search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_retries == 0 {
            return Err(AppError::validation("crawler.max_retries must be >= 1"));
        }
        if self.crawler.max_pages == 0 {
            return Err(AppError::validation("crawler.max_pages must be > 0"));
        }
        if self.search.results_per_page == 0 {
            return Err(AppError::validation("search.results_per_page must be > 0"));
        }
        Url::parse(&self.search.base_url)
            .map_err(|e| AppError::validation(format!("search.base_url is invalid: {e}")))?;
        Ok(())
    }
}

/// HTTP client and crawl-loop behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Mandatory pause after every successful page, in milliseconds.
    /// The target site rate-limits aggressive clients.
    #[serde(default = "defaults::page_delay")]
    pub page_delay_ms: u64,

    /// Maximum fetch+extract attempts per page (>= 1)
    #[serde(default = "defaults::max_retries")]
    pub max_retries: u32,

    /// Base backoff between retries in milliseconds; doubled per attempt
    #[serde(default = "defaults::retry_backoff")]
    pub retry_backoff_ms: u64,

    /// Hard ceiling on pages per crawl, the last-resort circuit breaker
    #[serde(default = "defaults::max_pages")]
    pub max_pages: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            page_delay_ms: defaults::page_delay(),
            max_retries: defaults::max_retries(),
            retry_backoff_ms: defaults::retry_backoff(),
            max_pages: defaults::max_pages(),
        }
    }
}

/// Target-site search settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search-results page URL, without query parameters
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Results per page, drives offset arithmetic
    #[serde(default = "defaults::results_per_page")]
    pub results_per_page: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            results_per_page: defaults::results_per_page(),
        }
    }
}

impl SearchConfig {
    /// Build the results-page URL for a keyword query at a given offset.
    pub fn page_url(&self, keywords: &str, offset: usize) -> Result<String> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut()
            .append_pair("keywords", keywords)
            .append_pair("from", &offset.to_string())
            .append_pair("s", "1");
        Ok(url.into())
    }

    /// Build the first results-page URL for a keyword query.
    pub fn search_url(&self, keywords: &str) -> Result<String> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut().append_pair("keywords", keywords);
        Ok(url.into())
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output path
    #[serde(default = "defaults::output_path")]
    pub path: String,

    /// Default output format ("csv" or "json")
    #[serde(default = "defaults::output_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
            format: defaults::output_format(),
        }
    }
}

/// Default values for configuration fields.
mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
            .to_string()
    }

    pub fn timeout() -> u64 {
        30
    }

    pub fn page_delay() -> u64 {
        1000
    }

    pub fn max_retries() -> u32 {
        3
    }

    pub fn retry_backoff() -> u64 {
        2000
    }

    pub fn max_pages() -> u32 {
        200
    }

    pub fn base_url() -> String {
        "https://careers.labcorp.com/global/en/search-results".to_string()
    }

    pub fn results_per_page() -> usize {
        20
    }

    pub fn output_path() -> String {
        "jobs.csv".to_string()
    }

    pub fn output_format() -> String {
        "csv".to_string()
    }
}
