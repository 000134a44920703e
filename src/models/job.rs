//! Job posting data structure.

use serde::{Deserialize, Serialize};

/// A single job posting extracted from a search-results page.
///
/// `job_id` is the stable identifier: two records with equal `job_id`
/// are the same posting regardless of other field differences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobRecord {
    /// Job title
    pub title: String,

    /// Location (city/state or "Remote")
    #[serde(default)]
    pub location: String,

    /// Job category or role family
    #[serde(default, alias = "role")]
    pub category: String,

    /// Stable posting identifier, used as the dedup key
    pub job_id: String,

    /// Full URL to the posting
    pub url: String,

    /// Employment type ("Full-time", "Part-time", ...), if published
    #[serde(default)]
    pub employment_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_role_alias() {
        let json = r#"{
            "title": "QA Engineer",
            "location": "Durham, NC",
            "role": "Quality Assurance",
            "job_id": "2410-12345",
            "url": "https://careers.example.com/job/2410-12345"
        }"#;

        let record: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, "Quality Assurance");
        assert_eq!(record.employment_type, None);
    }

    #[test]
    fn test_deserialize_minimal() {
        let json = r#"{"title": "Tech", "job_id": "99", "url": "https://x.example/99"}"#;
        let record: JobRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.location, "");
        assert_eq!(record.category, "");
    }
}
