// src/pipeline/driver.rs

//! The pagination-and-extraction loop.
//!
//! `PaginationDriver` owns the crawl: it computes each page's address,
//! delegates to the fetcher and extractor, applies the retry policy,
//! deduplicates, and decides when the crawl is over. Pages are fetched
//! strictly sequentially; the next address may depend on the previous
//! response, and the target site rate-limits parallel clients.
//!
//! Termination signals, checked every iteration:
//! - an empty page (end-of-results guard)
//! - the computed page count, when the site reports a total
//! - no next token (no link, and a partial page in offset mode)
//! - a repeated token or the page ceiling (loop circuit breaker)
//! - external cancellation
//!
//! A mid-crawl page failure never discards prior pages: after
//! `max_retries` the page degrades to terminal-empty and the crawl
//! returns everything accumulated so far. Only a failure on the very
//! first page surfaces as an error, since that points at a bad start
//! token rather than transient site trouble.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::models::{CrawlerConfig, JobRecord, PageResult, PageToken, SearchConfig};
use crate::pipeline::Deduplicator;
use crate::services::{PageFetcher, RecordExtractor};
use crate::utils::resolve;

/// Progress callback: `(page_number, jobs_accumulated)`.
///
/// Side effect only; never affects control flow.
pub type ProgressFn = Box<dyn Fn(u32, usize) + Send + Sync>;

/// Cheap clonable cancellation flag, checked at the top of each
/// loop iteration. Cancelling returns partial results cleanly.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why the crawl loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Empty page or no next token
    EndOfResults,
    /// Computed page count reached
    TotalReached,
    /// Repeated token or page ceiling
    LoopGuard,
    /// Retries exhausted on a page past the first
    PageFailure,
    /// External cancellation
    Cancelled,
}

/// Final result of a crawl run.
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Deduplicated jobs in encounter order
    pub jobs: Vec<JobRecord>,
    pub pages_fetched: u32,
    pub pages_failed: u32,
    pub duplicates_skipped: usize,
    pub stop: StopReason,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Drives the sequential crawl of paginated search results.
pub struct PaginationDriver {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn RecordExtractor>,
    crawler: CrawlerConfig,
    search: SearchConfig,
    query: String,
    progress: Option<ProgressFn>,
    cancel: CancelToken,
    seed_ids: Vec<String>,
}

impl PaginationDriver {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn RecordExtractor>,
        crawler: CrawlerConfig,
        search: SearchConfig,
        query: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            crawler,
            search,
            query: query.into(),
            progress: None,
            cancel: CancelToken::new(),
            seed_ids: Vec::new(),
        }
    }

    /// Report progress after each successful page.
    pub fn with_progress(mut self, progress: impl Fn(u32, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Attach an external cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Seed the deduplicator with identifiers from a previous run.
    pub fn with_seen_ids(mut self, ids: impl IntoIterator<Item = String>) -> Self {
        self.seed_ids = ids.into_iter().collect();
        self
    }

    /// Crawl from `start` until a termination signal fires.
    pub async fn crawl(&self, start: PageToken) -> Result<CrawlOutcome> {
        let started_at = Utc::now();
        let mut dedup = Deduplicator::with_seen(self.seed_ids.iter().cloned());
        let mut jobs: Vec<JobRecord> = Vec::new();
        let mut pages_fetched = 0u32;
        let mut pages_failed = 0u32;
        let mut duplicates_skipped = 0usize;
        let mut stop = StopReason::EndOfResults;

        let mut current = Some(start);
        let mut page_number = 0u32;

        while let Some(token) = current.take() {
            if self.cancel.is_cancelled() {
                info!(
                    "Cancellation requested; returning {} jobs collected so far",
                    jobs.len()
                );
                stop = StopReason::Cancelled;
                break;
            }

            page_number += 1;
            let url = self.address(&token)?;
            debug!("Fetching page {page_number}: {url}");

            let page = match self.fetch_page(&url, page_number).await {
                Ok(page) => page,
                // A start token that never answers is a configuration
                // problem, not transient site trouble.
                Err(error) if page_number == 1 => return Err(error),
                Err(error) => {
                    warn!(
                        "Giving up on page {page_number} after {} attempts: {error}. \
                         Keeping {} jobs from earlier pages.",
                        self.crawler.max_retries,
                        jobs.len()
                    );
                    pages_failed += 1;
                    stop = StopReason::PageFailure;
                    break;
                }
            };
            pages_fetched += 1;

            let fetched = page.records.len();
            if fetched == 0 {
                debug!("Page {page_number} has no records; end of results");
                break;
            }

            let total_count = page.total_count;
            let next_link = page.next_page.clone();
            for record in page.records {
                if dedup.admit(&record.job_id) {
                    jobs.push(record);
                } else {
                    duplicates_skipped += 1;
                }
            }

            if let Some(progress) = &self.progress {
                progress(page_number, jobs.len());
            }

            if let Some(total) = total_count {
                let page_count = total.div_ceil(self.search.results_per_page.max(1)) as u32;
                if page_number >= page_count {
                    debug!("Computed page count reached ({page_count} pages, {total} results)");
                    stop = StopReason::TotalReached;
                    break;
                }
            }

            let Some(next) = self.next_token(&token, next_link.as_deref(), fetched) else {
                break;
            };

            if let Err(error) = self.guard_pagination(page_number, &token, &next) {
                warn!("{error}; returning partial results");
                stop = StopReason::LoopGuard;
                break;
            }

            tokio::time::sleep(Duration::from_millis(self.crawler.page_delay_ms)).await;
            current = Some(next);
        }

        info!(
            "Crawl finished: {} jobs over {pages_fetched} pages \
             ({duplicates_skipped} duplicates skipped)",
            jobs.len()
        );

        Ok(CrawlOutcome {
            jobs,
            pages_fetched,
            pages_failed,
            duplicates_skipped,
            stop,
            started_at,
            finished_at: Utc::now(),
        })
    }

    /// Fetch and extract one page, retrying with backoff.
    async fn fetch_page(&self, url: &str, page_number: u32) -> Result<PageResult> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let result = match self.fetcher.fetch(url).await {
                Ok(raw) => self.extractor.extract(&raw),
                Err(error) => Err(error),
            };

            match result {
                Ok(page) => return Ok(page),
                Err(error) if attempt >= self.crawler.max_retries => return Err(error),
                Err(error) => {
                    let backoff = self.backoff(attempt);
                    warn!(
                        "Page {page_number} attempt {attempt}/{} failed: {error}. \
                         Retrying in {backoff:?}",
                        self.crawler.max_retries
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    /// Exponential backoff, capped at 30 seconds.
    fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(5);
        Duration::from_millis(self.crawler.retry_backoff_ms.saturating_mul(factor))
            .min(Duration::from_secs(30))
    }

    /// Resolve a token to a fetchable URL.
    fn address(&self, token: &PageToken) -> Result<String> {
        match token {
            PageToken::Url(url) => Ok(url.clone()),
            PageToken::Offset(offset) => self.search.page_url(&self.query, *offset),
        }
    }

    /// Compute the next token, or `None` when pagination is exhausted.
    ///
    /// An explicit next link wins; relative links are resolved against
    /// the site's base origin. In offset mode a full page advances the
    /// offset by one page size, and a partial page is the last page.
    fn next_token(
        &self,
        current: &PageToken,
        next_page: Option<&str>,
        fetched: usize,
    ) -> Option<PageToken> {
        if let Some(link) = next_page {
            let resolved = resolve(&self.search.base_url, link).unwrap_or_else(|| link.to_string());
            return Some(PageToken::Url(resolved));
        }

        match current {
            PageToken::Offset(offset) if fetched >= self.search.results_per_page => {
                Some(PageToken::Offset(offset + self.search.results_per_page))
            }
            _ => None,
        }
    }

    /// Loop circuit breaker: a repeated token or the page ceiling
    /// terminates the crawl instead of looping forever.
    fn guard_pagination(&self, page_number: u32, current: &PageToken, next: &PageToken) -> Result<()> {
        if next == current {
            return Err(AppError::pagination(
                page_number,
                format!("next page resolves to the current token ({current})"),
            ));
        }
        if page_number >= self.crawler.max_pages {
            return Err(AppError::pagination(
                page_number,
                format!("page ceiling of {} reached", self.crawler.max_pages),
            ));
        }
        Ok(())
    }
}
