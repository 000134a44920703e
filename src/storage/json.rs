// src/storage/json.rs

//! JSON sink with an `{updated_at, count, jobs}` envelope.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::JobRecord;
use crate::storage::ResultSink;

/// Envelope written around the job list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlDump {
    /// ISO 8601 timestamp of the write
    pub updated_at: DateTime<Utc>,
    /// Total job count
    pub count: usize,
    /// The jobs array
    pub jobs: Vec<JobRecord>,
}

/// Writes jobs as pretty-printed JSON.
pub struct JsonSink;

#[async_trait]
impl ResultSink for JsonSink {
    async fn persist(&self, jobs: &[JobRecord], dest: &Path) -> Result<usize> {
        let dump = CrawlDump {
            updated_at: Utc::now(),
            count: jobs.len(),
            jobs: jobs.to_vec(),
        };
        let bytes = serde_json::to_vec_pretty(&dump)?;

        let tmp = dest.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);
        tokio::fs::rename(&tmp, dest).await?;

        Ok(dump.count)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_persist_round_trip() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("jobs.json");

        let jobs = vec![JobRecord {
            title: "QA Tester".into(),
            location: "Remote".into(),
            category: "QA".into(),
            job_id: "224455".into(),
            url: "https://careers.example.com/job/224455".into(),
            employment_type: None,
        }];

        let rows = JsonSink.persist(&jobs, &dest).await.unwrap();
        assert_eq!(rows, 1);

        let loaded: CrawlDump =
            serde_json::from_slice(&std::fs::read(&dest).unwrap()).unwrap();
        assert_eq!(loaded.count, 1);
        assert_eq!(loaded.jobs[0].job_id, "224455");
    }

    #[tokio::test]
    async fn test_empty_input_reports_zero() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("jobs.json");

        let rows = JsonSink.persist(&[], &dest).await.unwrap();
        assert_eq!(rows, 0);
    }
}
