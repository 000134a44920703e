// src/services/payload.rs

//! JSON payload extraction with strict-then-lenient parsing.
//!
//! Model-backed extraction services return a JSON object of the form
//! `{"jobs": [...], "next_page": ..., "total_jobs": ...}`, sometimes
//! wrapped in markdown code fences or surrounded by prose. Parsing is
//! strict first; on failure a bounded sequence of normalization
//! transforms is applied before giving up with an extract error.

use log::{debug, warn};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{JobRecord, PageResult};
use crate::services::RecordExtractor;
use crate::utils::url::extract_job_id;

/// Extractor for structured JSON payloads.
#[derive(Debug, Default)]
pub struct JsonExtractor;

impl JsonExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize, Default)]
struct RawPayload {
    #[serde(default)]
    jobs: Vec<RawJob>,
    #[serde(default)]
    next_page: Option<String>,
    #[serde(default, alias = "total_jobs", alias = "total_count")]
    total: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    location: String,
    #[serde(default, alias = "role")]
    category: String,
    #[serde(default)]
    job_id: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    employment_type: Option<String>,
}

impl RawJob {
    /// Promote to a [`JobRecord`], deriving a missing id from the URL.
    fn into_record(self) -> Option<JobRecord> {
        let job_id = if self.job_id.is_empty() {
            extract_job_id(&self.url)?
        } else {
            self.job_id
        };

        Some(JobRecord {
            title: self.title,
            location: self.location,
            category: self.category,
            job_id,
            url: self.url,
            employment_type: self.employment_type.filter(|t| !t.is_empty()),
        })
    }
}

impl RecordExtractor for JsonExtractor {
    fn extract(&self, raw: &str) -> Result<PageResult> {
        let payload = parse_lenient(raw)
            .ok_or_else(|| AppError::extract("payload is not valid JSON after normalization"))?;

        let mut records = Vec::new();
        for job in payload.jobs {
            match job.into_record() {
                Some(record) => records.push(record),
                None => warn!("Dropping job without a derivable job_id"),
            }
        }

        Ok(PageResult {
            records,
            next_page: payload.next_page.filter(|link| !link.trim().is_empty()),
            total_count: payload.total,
        })
    }
}

/// Strict parse, then a bounded sequence of normalization transforms.
fn parse_lenient(raw: &str) -> Option<RawPayload> {
    if let Ok(payload) = serde_json::from_str(raw) {
        return Some(payload);
    }

    if let Some(inner) = strip_code_fence(raw) {
        if let Ok(payload) = serde_json::from_str(inner) {
            debug!("Payload parsed after stripping code fence");
            return Some(payload);
        }
    }

    if let Some(inner) = trim_to_braces(raw) {
        if let Ok(payload) = serde_json::from_str(inner) {
            debug!("Payload parsed after trimming to outermost braces");
            return Some(payload);
        }
    }

    None
}

/// Pull the content out of a ```` ```json ... ``` ```` fence.
fn strip_code_fence(raw: &str) -> Option<&str> {
    let start = raw.find("```")? + 3;
    let rest = &raw[start..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

/// Trim to the outermost `{ ... }` pair.
fn trim_to_braces(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "jobs": [
            {"title": "QA Tester", "location": "Durham, NC", "role": "QA",
             "job_id": "101", "url": "https://careers.example.com/job/101"},
            {"title": "Lab Assistant", "location": "Remote",
             "url": "https://careers.example.com/job/102/lab-assistant"}
        ],
        "next_page": "/search-results?from=20",
        "total_jobs": 45
    }"#;

    #[test]
    fn test_strict_parse() {
        let page = JsonExtractor::new().extract(PAYLOAD).unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[0].category, "QA");
        assert_eq!(page.records[1].job_id, "102"); // derived from URL
        assert_eq!(page.next_page.as_deref(), Some("/search-results?from=20"));
        assert_eq!(page.total_count, Some(45));
    }

    #[test]
    fn test_fenced_payload() {
        let fenced = format!("Here is the result:\n```json\n{PAYLOAD}\n```\n");
        let page = JsonExtractor::new().extract(&fenced).unwrap();
        assert_eq!(page.records.len(), 2);
    }

    #[test]
    fn test_prose_wrapped_payload() {
        let wrapped = format!("Sure! The extracted jobs are: {PAYLOAD} Let me know.");
        let page = JsonExtractor::new().extract(&wrapped).unwrap();
        assert_eq!(page.total_count, Some(45));
    }

    #[test]
    fn test_garbage_is_an_error() {
        let result = JsonExtractor::new().extract("jobs: title = QA {{{");
        assert!(matches!(result, Err(AppError::Extract(_))));
    }

    #[test]
    fn test_empty_next_page_is_none() {
        let page = JsonExtractor::new()
            .extract(r#"{"jobs": [], "next_page": ""}"#)
            .unwrap();
        assert_eq!(page.next_page, None);
    }

    #[test]
    fn test_job_without_any_id_is_dropped() {
        let page = JsonExtractor::new()
            .extract(r#"{"jobs": [{"title": "Mystery", "url": "https://x.example/about"}]}"#)
            .unwrap();
        assert!(page.records.is_empty());
    }
}
