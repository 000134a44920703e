//! Service layer for the crawler application.
//!
//! This module contains the pluggable collaborators of the crawl loop:
//! - Page fetching (`PageFetcher` / `HttpFetcher`)
//! - Record extraction (`RecordExtractor` / `SelectorExtractor` / `JsonExtractor`)

mod extractor;
mod fetcher;
mod payload;

pub use extractor::{RecordExtractor, SelectorExtractor};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use payload::JsonExtractor;
