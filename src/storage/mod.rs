//! Result persistence.
//!
//! A [`ResultSink`] takes the final deduplicated job list and writes it
//! to a destination file. Sinks accept an empty list and report zero
//! rows written rather than failing.

pub mod csv;
pub mod json;

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::JobRecord;

pub use csv::CsvSink;
pub use json::JsonSink;

/// Persists an ordered job list, returning the number of rows written.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn persist(&self, jobs: &[JobRecord], dest: &Path) -> Result<usize>;
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    /// Build the sink for this format.
    pub fn sink(self) -> Box<dyn ResultSink> {
        match self {
            OutputFormat::Csv => Box::new(CsvSink),
            OutputFormat::Json => Box::new(JsonSink),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("csv"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("xlsx"), None);
    }
}
