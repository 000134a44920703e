// src/utils/url.rs

//! Job-identifier extraction from posting URLs.

use std::sync::OnceLock;

use regex::Regex;

static ID_PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();

/// Compiled once; called per record on every page.
fn id_patterns() -> &'static [Regex; 3] {
    // Common patterns: ?jobid=123, /job/123/title, /job/title-123
    ID_PATTERNS.get_or_init(|| {
        [
            Regex::new(r"(?i)[?&](?:jobid|job_id|id|req)=([^&#/]+)").expect("job id query pattern"),
            Regex::new(r"/(\d+)(?:[/?#]|$)").expect("job id path pattern"),
            Regex::new(r"(\d+)/?$").expect("job id suffix pattern"),
        ]
    })
}

/// Extract a stable job identifier from a posting URL.
///
/// Job URLs on the target site carry the id in the path
/// (`/global/en/job/224455/QA-Tester` or `/job/qa-tester-224455`);
/// some sites put it in a query parameter instead.
pub fn extract_job_id(url: &str) -> Option<String> {
    for pattern in id_patterns() {
        if let Some(caps) = pattern.captures(url) {
            if let Some(id) = caps.get(1) {
                return Some(id.as_str().to_string());
            }
        }
    }
    None
}
