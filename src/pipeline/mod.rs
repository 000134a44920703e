//! Pipeline entry points and the crawl loop.
//!
//! - `PaginationDriver`: owns the page loop, retry policy, and
//!   termination detection
//! - `Deduplicator`: per-crawl job-id filtering
//! - `run_crawl`: wires fetcher + extractor + driver + sink

pub mod crawl;
pub mod dedup;
pub mod driver;

pub use crawl::{CrawlRequest, run_crawl};
pub use dedup::Deduplicator;
pub use driver::{CancelToken, CrawlOutcome, PaginationDriver, StopReason};
