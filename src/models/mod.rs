// src/models/mod.rs

//! Domain models for the crawler application.

mod config;
mod job;
mod page;

pub use config::{Config, CrawlerConfig, OutputConfig, SearchConfig};
pub use job::JobRecord;
pub use page::{PageResult, PageToken};
