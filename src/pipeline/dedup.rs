// src/pipeline/dedup.rs

//! Job-id deduplication.

use std::collections::HashSet;

/// Filters records already seen by their stable `job_id`.
///
/// Scope is one crawl invocation; seed with [`Deduplicator::with_seen`]
/// to carry identifiers over from a previous run.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    /// Create an empty deduplicator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deduplicator pre-seeded with already-known identifiers.
    pub fn with_seen(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            seen: ids.into_iter().collect(),
        }
    }

    /// Admit a record by id: true iff `job_id` has not been seen before.
    pub fn admit(&mut self, job_id: &str) -> bool {
        self.seen.insert(job_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admit_is_idempotent() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.admit("224455"));
        assert!(!dedup.admit("224455"));
    }

    #[test]
    fn test_distinct_ids_admitted() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.admit("1"));
        assert!(dedup.admit("2"));
        assert!(!dedup.admit("1"));
    }

    #[test]
    fn test_seeded_ids_rejected() {
        let mut dedup = Deduplicator::with_seen(["224455".to_string()]);
        assert!(!dedup.admit("224455"));
        assert!(dedup.admit("224456"));
    }
}
