// src/services/fetcher.rs

//! Page fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Fetches rendered page content for a URL.
///
/// The driver's loop is synchronous from its own point of view: a
/// fetcher may do whatever it wants internally, but `fetch` suspends
/// until the page content is complete.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `url`, returning its raw content.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher backed by a shared reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::fetch(url, e))?;

        let response = response
            .error_for_status()
            .map_err(|e| AppError::fetch(url, e))?;

        response.text().await.map_err(|e| AppError::fetch(url, e))
    }
}
