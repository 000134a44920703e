// src/pipeline/crawl.rs

//! Crawl pipeline entry point: wires fetcher, extractor, driver, sink.

use std::path::PathBuf;
use std::sync::Arc;

use log::info;

use crate::error::Result;
use crate::models::{Config, PageToken};
use crate::pipeline::{CancelToken, PaginationDriver};
use crate::services::{HttpFetcher, SelectorExtractor};
use crate::storage::OutputFormat;

/// Parameters for one crawl run.
#[derive(Debug)]
pub struct CrawlRequest {
    /// Keyword query, e.g. "QA automation testing"
    pub query: String,
    /// Explicit start URL; overrides the configured search URL
    pub start_url: Option<String>,
    /// Use offset-based pagination instead of following next links
    pub offset_mode: bool,
    /// Output file path
    pub output: PathBuf,
    /// Output format
    pub format: OutputFormat,
    /// Identifiers from a previous run to exclude
    pub seen_ids: Vec<String>,
}

/// Run a full crawl and persist the results. Returns rows written.
pub async fn run_crawl(
    config: &Config,
    request: CrawlRequest,
    cancel: CancelToken,
) -> Result<usize> {
    let fetcher = Arc::new(HttpFetcher::new(&config.crawler)?);
    let extractor = Arc::new(SelectorExtractor::new(&config.search.base_url)?);

    let start = match (&request.start_url, request.offset_mode) {
        (Some(url), _) => PageToken::Url(url.clone()),
        (None, true) => PageToken::Offset(0),
        (None, false) => PageToken::Url(config.search.search_url(&request.query)?),
    };

    info!("Starting crawl for \"{}\" at {start}", request.query);

    let driver = PaginationDriver::new(
        fetcher,
        extractor,
        config.crawler.clone(),
        config.search.clone(),
        request.query.clone(),
    )
    .with_cancel(cancel)
    .with_seen_ids(request.seen_ids)
    .with_progress(|page_number, total| {
        info!("Processed page {page_number}. Found {total} jobs so far");
    });

    let outcome = driver.crawl(start).await?;

    let elapsed = outcome.finished_at - outcome.started_at;
    info!(
        "Crawled {} pages in {}s ({} failed, {} duplicates skipped, stop: {:?})",
        outcome.pages_fetched,
        elapsed.num_seconds(),
        outcome.pages_failed,
        outcome.duplicates_skipped,
        outcome.stop,
    );

    let rows = request
        .format
        .sink()
        .persist(&outcome.jobs, &request.output)
        .await?;
    info!("Saved {rows} rows to {}", request.output.display());

    Ok(rows)
}
