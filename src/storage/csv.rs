// src/storage/csv.rs

//! CSV sink: one row per job, UTF-8, RFC 4180 quoting.

use std::borrow::Cow;
use std::path::Path;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::JobRecord;
use crate::storage::ResultSink;

const HEADER: &str = "title,location,category,job_id,url,employment_type";

/// Writes jobs as a CSV file with a header row.
pub struct CsvSink;

impl CsvSink {
    fn render(jobs: &[JobRecord]) -> String {
        let mut out = String::with_capacity(64 + jobs.len() * 128);
        out.push_str(HEADER);
        out.push('\n');

        for job in jobs {
            let fields = [
                job.title.as_str(),
                job.location.as_str(),
                job.category.as_str(),
                job.job_id.as_str(),
                job.url.as_str(),
                job.employment_type.as_deref().unwrap_or(""),
            ];
            let row: Vec<Cow<'_, str>> = fields.iter().map(|f| escape(f)).collect();
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }
}

#[async_trait]
impl ResultSink for CsvSink {
    async fn persist(&self, jobs: &[JobRecord], dest: &Path) -> Result<usize> {
        let content = Self::render(jobs);

        // Write to a temp file and rename so a crash mid-write never
        // leaves a truncated output file.
        let tmp = dest.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        drop(file);
        tokio::fs::rename(&tmp, dest).await?;

        Ok(jobs.len())
    }
}

/// Quote a field iff it contains a comma, quote, or line break.
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
