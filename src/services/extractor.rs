// src/services/extractor.rs

//! Selector-based record extraction.
//!
//! Parses job cards out of search-results HTML using the site's
//! `data-ph-at-id` attributes.

use log::debug;
use scraper::{Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{JobRecord, PageResult};
use crate::utils::resolve_url;
use crate::utils::url::extract_job_id;

/// Turns raw page content into records plus pagination metadata.
///
/// Implementations guarantee that every returned record has a
/// non-empty `job_id` and that `next_page` is never an empty string.
pub trait RecordExtractor: Send + Sync {
    /// Extract all records and pagination metadata from one page.
    fn extract(&self, raw: &str) -> Result<PageResult>;
}

/// CSS-selector extractor for the target careers site.
pub struct SelectorExtractor {
    base_url: Url,
    row_sel: Selector,
    link_sel: Selector,
    location_sel: Selector,
    category_sel: Selector,
    type_sel: Selector,
    next_sel: Selector,
    total_sel: Selector,
}

impl SelectorExtractor {
    /// Create an extractor resolving job links against `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            row_sel: Self::parse_selector(r#"[data-ph-at-id="jobs-list-item"]"#)?,
            link_sel: Self::parse_selector(r#"a[data-ph-at-id="job-link"]"#)?,
            location_sel: Self::parse_selector(r#"[data-ph-at-id="job-location"]"#)?,
            category_sel: Self::parse_selector(r#"[data-ph-at-id="job-category"]"#)?,
            type_sel: Self::parse_selector(r#"[data-ph-at-id="job-type"]"#)?,
            next_sel: Self::parse_selector(r#"a[data-ph-at-id="pagination-next-link"]"#)?,
            total_sel: Self::parse_selector(r#"[data-ph-at-id="search-results-count"]"#)?,
        })
    }

    fn parse_selector(s: &str) -> Result<Selector> {
        Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
    }

    fn parse_job_row(&self, row: &scraper::ElementRef) -> Option<JobRecord> {
        let link = row.select(&self.link_sel).next()?;
        let title = text_of(&link);
        let href = link.value().attr("href").unwrap_or("");
        if title.is_empty() || href.is_empty() {
            return None;
        }

        let url = resolve_url(&self.base_url, href);
        let job_id = row
            .value()
            .attr("data-job-id")
            .map(str::to_string)
            .filter(|id| !id.is_empty())
            .or_else(|| extract_job_id(&url))?;

        let location = row
            .select(&self.location_sel)
            .next()
            .map(|el| text_of(&el))
            .unwrap_or_default();
        let category = row
            .select(&self.category_sel)
            .next()
            .map(|el| text_of(&el))
            .unwrap_or_default();
        let employment_type = row
            .select(&self.type_sel)
            .next()
            .map(|el| text_of(&el))
            .filter(|t| !t.is_empty());

        Some(JobRecord {
            title,
            location,
            category,
            job_id,
            url,
            employment_type,
        })
    }
}

impl RecordExtractor for SelectorExtractor {
    fn extract(&self, raw: &str) -> Result<PageResult> {
        let document = Html::parse_document(raw);

        let mut records = Vec::new();
        for row in document.select(&self.row_sel) {
            match self.parse_job_row(&row) {
                Some(record) => records.push(record),
                None => debug!("Skipping job card without title link or stable id"),
            }
        }

        // An empty href must never be conflated with "no next page".
        let next_page = document
            .select(&self.next_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .map(str::to_string);

        let total_count = document
            .select(&self.total_sel)
            .next()
            .map(|el| text_of(&el))
            .and_then(|text| parse_count(&text));

        Ok(PageResult {
            records,
            next_page,
            total_count,
        })
    }
}

fn text_of(el: &scraper::ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Parse a result count out of header text like "1,234 jobs found".
fn parse_count(text: &str) -> Option<usize> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://careers.example.com/global/en/search-results";

    fn page_html(rows: &str, extra: &str) -> String {
        format!(r#"<html><body><ul>{rows}</ul>{extra}</body></html>"#)
    }

    fn job_row(id: &str, title: &str, href: &str) -> String {
        format!(
            r#"<li data-ph-at-id="jobs-list-item" data-job-id="{id}">
                 <a data-ph-at-id="job-link" href="{href}">{title}</a>
                 <span data-ph-at-id="job-location">Durham, NC</span>
                 <span data-ph-at-id="job-category">Lab Operations</span>
               </li>"#
        )
    }

    #[test]
    fn test_extract_records_and_metadata() {
        let rows = [
            job_row("101", "Lab Assistant", "/global/en/job/101/lab-assistant"),
            job_row("102", "QA Tester", "/global/en/job/102/qa-tester"),
        ]
        .join("");
        let extra = r#"
            <span data-ph-at-id="search-results-count">45 jobs found</span>
            <a data-ph-at-id="pagination-next-link" href="/global/en/search-results?from=20&s=1">Next</a>
        "#;

        let extractor = SelectorExtractor::new(BASE).unwrap();
        let page = extractor.extract(&page_html(&rows, extra)).unwrap();

        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].job_id, "101");
        assert_eq!(page.records[0].location, "Durham, NC");
        assert_eq!(
            page.records[0].url,
            "https://careers.example.com/global/en/job/101/lab-assistant"
        );
        assert_eq!(
            page.next_page.as_deref(),
            Some("/global/en/search-results?from=20&s=1")
        );
        assert_eq!(page.total_count, Some(45));
    }

    #[test]
    fn test_job_id_falls_back_to_url() {
        let row = r#"<li data-ph-at-id="jobs-list-item">
            <a data-ph-at-id="job-link" href="/global/en/job/224455/qa-tester">QA Tester</a>
        </li>"#;

        let extractor = SelectorExtractor::new(BASE).unwrap();
        let page = extractor.extract(&page_html(row, "")).unwrap();

        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].job_id, "224455");
    }

    #[test]
    fn test_row_without_id_is_dropped() {
        let row = r#"<li data-ph-at-id="jobs-list-item">
            <a data-ph-at-id="job-link" href="/global/en/careers-home">Untracked</a>
        </li>"#;

        let extractor = SelectorExtractor::new(BASE).unwrap();
        let page = extractor.extract(&page_html(row, "")).unwrap();
        assert!(page.records.is_empty());
    }

    #[test]
    fn test_empty_next_href_is_none() {
        let extra = r#"<a data-ph-at-id="pagination-next-link" href="">Next</a>"#;
        let extractor = SelectorExtractor::new(BASE).unwrap();
        let page = extractor.extract(&page_html("", extra)).unwrap();
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_no_results_page() {
        let extractor = SelectorExtractor::new(BASE).unwrap();
        let page = extractor
            .extract("<html><body><p>No Results Found</p></body></html>")
            .unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.next_page, None);
        assert_eq!(page.total_count, None);
    }
}
