//! Per-page extraction results and pagination addressing.

use std::fmt;

use crate::models::JobRecord;

/// Everything extracted from one search-results page.
///
/// Produced fresh per fetch; never persisted.
#[derive(Debug, Clone, Default)]
pub struct PageResult {
    /// Job records in page order
    pub records: Vec<JobRecord>,

    /// Explicit "next" link (possibly relative), or `None`.
    /// Extractors must never put an empty string here.
    pub next_page: Option<String>,

    /// Total result count reported by the site, if any
    pub total_count: Option<usize>,
}

/// Address of a single results page.
///
/// The target site exposes both cursor-link pagination (a "next" href)
/// and offset pagination (a `from=` query parameter), so the driver
/// has to support both modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageToken {
    /// Fully-resolved page URL
    Url(String),
    /// Result offset for offset-based pagination
    Offset(usize),
}

impl fmt::Display for PageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageToken::Url(url) => write!(f, "{url}"),
            PageToken::Offset(offset) => write!(f, "offset {offset}"),
        }
    }
}
